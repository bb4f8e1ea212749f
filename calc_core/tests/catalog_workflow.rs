//! End-to-end checks through the catalog, the registry and form state.

use approx::assert_abs_diff_eq;
use calc_core::catalog::{self, Category, Route};
use calc_core::{CalculatorId, FormState, RawInputs, Settings};

fn evaluate(category: &str, slug: &str, raw: RawInputs) -> calc_core::Evaluation {
    let (_, id) = catalog::lookup(category, slug).unwrap();
    id.evaluate(&raw, &Settings::default()).unwrap()
}

#[test]
fn simple_interest_example() {
    let raw = RawInputs::new()
        .with("principal", "1000")
        .with("rate", "10")
        .with("time", "1")
        .with("time_unit", "years");
    let eval = evaluate("finance", "simple-interest", raw);
    assert_abs_diff_eq!(eval.data["interest"].as_f64().unwrap(), 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(eval.data["total"].as_f64().unwrap(), 1100.0, epsilon = 1e-9);
}

#[test]
fn heart_rate_example() {
    let raw = RawInputs::new().with("age", "30").with("resting_hr", "70");
    let eval = evaluate("health", "heart-rate-zones", raw);
    assert_eq!(eval.data["max_hr"], 190.0);
    assert_eq!(eval.data["moderate"]["low_bpm"], 130.0);
    assert_eq!(eval.data["moderate"]["high_bpm"], 154.0);
    assert_eq!(eval.data["vigorous"]["low_bpm"], 154.0);
    assert_eq!(eval.data["vigorous"]["high_bpm"], 172.0);
}

#[test]
fn age_example_with_reference_date() {
    let raw = RawInputs::new().with("birth_date", "2000-02-29").with("as_of", "2024-03-01");
    let eval = evaluate("everyday", "age", raw);
    assert_eq!(eval.data["years"], 24);
    assert_eq!(eval.data["months"], 0);
    assert_eq!(eval.data["days"], 1);
}

#[test]
fn gpa_example() {
    let raw = RawInputs::new()
        .with_row([("name", "Math"), ("grade", "A"), ("credits", "3")])
        .with_row([("name", "History"), ("grade", "B"), ("credits", "3")]);
    let eval = evaluate("math", "gpa", raw);
    assert_eq!(eval.lines[0].value, "3.50");
}

#[test]
fn statistics_example() {
    let population = evaluate("math", "statistics", RawInputs::new().with("data", "1,2,2,3").with("mode", "population"));
    assert_eq!(population.data["count"], 4);
    assert_eq!(population.data["mean"], 2.0);
    assert_eq!(population.data["median"], 2.0);
    assert_eq!(population.data["variance"], 0.5);
    assert_abs_diff_eq!(population.data["std_dev"].as_f64().unwrap(), 0.7071, epsilon = 1e-4);
    assert!(population.lines.iter().any(|l| l.label == "Mode" && l.value == "2"));

    let sample = evaluate("math", "statistics", RawInputs::new().with("data", "1,2,2,3").with("mode", "sample"));
    assert_abs_diff_eq!(sample.data["variance"].as_f64().unwrap(), 0.6667, epsilon = 1e-4);
    assert_abs_diff_eq!(sample.data["std_dev"].as_f64().unwrap(), 0.8165, epsilon = 1e-4);
}

#[test]
fn coming_soon_keeps_metadata() {
    for category in Category::ALL {
        for page in catalog::calculators_in(category) {
            let route = catalog::resolve(category.slug(), page.slug);
            assert_eq!(route.meta(), Some(page));
            if !catalog::is_available(page) {
                match route {
                    Route::ComingSoon { category_href, categories_href, .. } => {
                        assert_eq!(category_href, category.href());
                        assert_eq!(categories_href, catalog::CATEGORIES_HREF);
                    }
                    other => panic!("{} should be coming soon, got {:?}", page.slug, other),
                }
            }
        }
    }
}

#[test]
fn every_calculator_rejects_empty_form_with_a_message() {
    let settings = Settings::default();
    for id in CalculatorId::ALL {
        let mut form = FormState::new(id);
        // GPA's default row is a complete course
        if id == CalculatorId::Gpa {
            assert!(form.compute(&settings));
            continue;
        }
        assert!(!form.compute(&settings), "{:?} accepted an empty form", id);
        assert!(!form.error().unwrap_or("").is_empty());
        assert!(form.result().is_none());
    }
}
