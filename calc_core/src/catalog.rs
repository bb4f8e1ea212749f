//! # Calculator Catalog
//!
//! Two static tables keyed by `(category, slug)`:
//!
//! - [`PAGES`] - title and description for every catalog entry
//! - the module table - which [`CalculatorId`] implements an entry
//!
//! An entry with metadata but no module resolves to [`Route::ComingSoon`],
//! a placeholder page linking back to its category and to the category list.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::catalog::{resolve, Route};
//! use calc_core::calculations::CalculatorId;
//!
//! match resolve("health", "heart-rate-zones") {
//!     Route::Calculator { id, .. } => assert_eq!(id, CalculatorId::HeartRateZones),
//!     other => panic!("unexpected route {:?}", other),
//! }
//! assert!(matches!(resolve("health", "body-fat"), Route::ComingSoon { .. }));
//! assert!(matches!(resolve("nope", "bmi"), Route::NotFound));
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::calculations::CalculatorId;
use crate::errors::{CalcError, CalcResult};

/// Href of the page listing every category
pub const CATEGORIES_HREF: &str = "/calculators";

/// Top-level catalog grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Health,
    Finance,
    Conversion,
    Math,
    Everyday,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Health,
        Category::Finance,
        Category::Conversion,
        Category::Math,
        Category::Everyday,
    ];

    /// URL path segment
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Health => "health",
            Category::Finance => "finance",
            Category::Conversion => "conversion",
            Category::Math => "math",
            Category::Everyday => "everyday",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.slug() == slug)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Health => "Health & Fitness",
            Category::Finance => "Finance",
            Category::Conversion => "Unit Conversion",
            Category::Math => "Math & Science",
            Category::Everyday => "Everyday Life",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Health => "Body metrics, heart rate training zones and activity energy.",
            Category::Finance => "Interest, loans and currency arithmetic.",
            Category::Conversion => "Convert between units of length, weight, volume, area, speed and temperature.",
            Category::Math => "Descriptive statistics, percentages and grade averages.",
            Category::Everyday => "Dates, tips and other day-to-day arithmetic.",
        }
    }

    pub fn href(&self) -> String {
        format!("{}/{}", CATEGORIES_HREF, self.slug())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Page metadata for one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub category: Category,
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl PageMeta {
    const fn new(category: Category, slug: &'static str, title: &'static str, description: &'static str) -> Self {
        Self {
            category,
            slug,
            title,
            description,
        }
    }

    pub fn href(&self) -> String {
        format!("{}/{}", self.category.href(), self.slug)
    }
}

use Category::*;

/// Metadata for every page, implemented or not
pub static PAGES: &[PageMeta] = &[
    // Health
    PageMeta::new(Health, "bmi", "BMI Calculator", "Body mass index from weight and height, metric or imperial."),
    PageMeta::new(Health, "heart-rate-zones", "Heart Rate Zone Calculator", "Moderate and vigorous training zones using the Karvonen method."),
    PageMeta::new(Health, "steps-to-calories", "Steps to Calories Calculator", "Estimate calories burned from a step count and body weight."),
    PageMeta::new(Health, "body-fat", "Body Fat Calculator", "Estimate body fat percentage from body measurements."),
    PageMeta::new(Health, "calorie-needs", "Daily Calorie Calculator", "Estimate daily energy needs from activity level."),
    // Finance
    PageMeta::new(Finance, "simple-interest", "Simple Interest Calculator", "Interest and total amount on a principal over years, months or days."),
    PageMeta::new(Finance, "compound-interest", "Compound Interest Calculator", "Future value with annual to daily compounding."),
    PageMeta::new(Finance, "loan-payment", "Loan Payment Calculator", "Monthly payment and total interest on an amortised loan."),
    PageMeta::new(Finance, "mortgage", "Mortgage Calculator", "Monthly mortgage payments with taxes and insurance."),
    PageMeta::new(Finance, "retirement", "Retirement Savings Calculator", "Project retirement savings from regular contributions."),
    // Conversion
    PageMeta::new(Conversion, "length", "Length Converter", "Convert between metric and imperial lengths."),
    PageMeta::new(Conversion, "weight", "Weight Converter", "Convert between grams, kilograms, ounces, pounds and more."),
    PageMeta::new(Conversion, "volume", "Volume Converter", "Convert between litres, cups, gallons and more."),
    PageMeta::new(Conversion, "area", "Area Converter", "Convert between square metres, acres, hectares and more."),
    PageMeta::new(Conversion, "speed", "Speed Converter", "Convert between m/s, km/h, mph, knots and ft/s."),
    PageMeta::new(Conversion, "temperature", "Temperature Converter", "Convert between Celsius, Fahrenheit and Kelvin."),
    PageMeta::new(Conversion, "currency", "Currency Converter", "Convert between major currencies using sample rates."),
    PageMeta::new(Conversion, "data-storage", "Data Storage Converter", "Convert between bytes, kilobytes, megabytes and more."),
    // Math
    PageMeta::new(Math, "statistics", "Statistics Calculator", "Mean, median, mode, variance and standard deviation of a data set."),
    PageMeta::new(Math, "percentage", "Percentage Calculator", "Percent of a number, ratios as percentages and percentage change."),
    PageMeta::new(Math, "gpa", "GPA Calculator", "Credit-weighted grade point average on a 4.0 scale."),
    PageMeta::new(Math, "fractions", "Fraction Calculator", "Add, subtract, multiply and divide fractions."),
    // Everyday
    PageMeta::new(Everyday, "age", "Age Calculator", "Exact age in years, months and days."),
    PageMeta::new(Everyday, "tip-split", "Tip Calculator", "Tip amount and per-person share of a bill."),
    PageMeta::new(Everyday, "fuel-cost", "Fuel Cost Calculator", "Trip fuel cost from distance, efficiency and price."),
];

static MODULES: Lazy<HashMap<(Category, &'static str), CalculatorId>> = Lazy::new(|| {
    HashMap::from([
        ((Health, "bmi"), CalculatorId::Bmi),
        ((Health, "heart-rate-zones"), CalculatorId::HeartRateZones),
        ((Health, "steps-to-calories"), CalculatorId::StepsToCalories),
        ((Finance, "simple-interest"), CalculatorId::SimpleInterest),
        ((Finance, "compound-interest"), CalculatorId::CompoundInterest),
        ((Finance, "loan-payment"), CalculatorId::LoanPayment),
        ((Conversion, "length"), CalculatorId::LengthConverter),
        ((Conversion, "weight"), CalculatorId::WeightConverter),
        ((Conversion, "volume"), CalculatorId::VolumeConverter),
        ((Conversion, "area"), CalculatorId::AreaConverter),
        ((Conversion, "speed"), CalculatorId::SpeedConverter),
        ((Conversion, "temperature"), CalculatorId::TemperatureConverter),
        ((Conversion, "currency"), CalculatorId::CurrencyConverter),
        ((Math, "statistics"), CalculatorId::Statistics),
        ((Math, "percentage"), CalculatorId::Percentage),
        ((Math, "gpa"), CalculatorId::Gpa),
        ((Everyday, "age"), CalculatorId::Age),
        ((Everyday, "tip-split"), CalculatorId::TipSplit),
    ])
});

/// Outcome of resolving a `{category}/{calculator}` path.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// An implemented calculator
    Calculator { meta: &'static PageMeta, id: CalculatorId },
    /// Known page without an implementation yet
    ComingSoon {
        meta: &'static PageMeta,
        category_href: String,
        categories_href: &'static str,
    },
    NotFound,
}

impl Route {
    /// Metadata for any found page
    pub fn meta(&self) -> Option<&'static PageMeta> {
        match self {
            Route::Calculator { meta, .. } | Route::ComingSoon { meta, .. } => Some(meta),
            Route::NotFound => None,
        }
    }
}

/// Metadata for a page, if the catalog knows it
pub fn page_metadata(category: &str, slug: &str) -> Option<&'static PageMeta> {
    let category = Category::from_slug(category)?;
    PAGES.iter().find(|p| p.category == category && p.slug == slug)
}

/// Resolve a path pair. Never panics.
pub fn resolve(category: &str, slug: &str) -> Route {
    let Some(meta) = page_metadata(category, slug) else {
        tracing::debug!(category, slug, "no catalog entry");
        return Route::NotFound;
    };
    match MODULES.get(&(meta.category, meta.slug)) {
        Some(&id) => Route::Calculator { meta, id },
        None => Route::ComingSoon {
            meta,
            category_href: meta.category.href(),
            categories_href: CATEGORIES_HREF,
        },
    }
}

/// Resolve to an implemented calculator or fail.
///
/// # Errors
///
/// * `CalculatorNotFound` - unknown page, or a page that is not implemented yet
pub fn lookup(category: &str, slug: &str) -> CalcResult<(&'static PageMeta, CalculatorId)> {
    match resolve(category, slug) {
        Route::Calculator { meta, id } => Ok((meta, id)),
        _ => Err(CalcError::calculator_not_found(category, slug)),
    }
}

/// Catalog page of an implemented calculator
pub fn page_of(id: CalculatorId) -> Option<&'static PageMeta> {
    MODULES
        .iter()
        .find(|(_, v)| **v == id)
        .and_then(|((category, slug), _)| PAGES.iter().find(|p| p.category == *category && p.slug == *slug))
}

/// Every page of a category, in table order
pub fn calculators_in(category: Category) -> Vec<&'static PageMeta> {
    PAGES.iter().filter(|p| p.category == category).collect()
}

/// Whether a page has an implementation
pub fn is_available(meta: &PageMeta) -> bool {
    MODULES.contains_key(&(meta.category, meta.slug))
}
