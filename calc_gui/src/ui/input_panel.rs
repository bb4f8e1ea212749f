//! Input Panel (Center)
//!
//! Shows whatever the current page calls for:
//! - Overview -> category cards with links to their calculators
//! - Calculator -> a form generated from the calculator's field specs
//! - Coming soon -> page title and description only

use iced::widget::{button, column, container, pick_list, row, rule, scrollable, text, text_input, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use calc_core::catalog::{self, Category, Route};
use calc_core::inputs::{ChoiceOption, FieldKind, FieldSpec};
use calc_core::FormState;

use crate::{App, Message, Page};

const LABEL_WIDTH: f32 = 110.0;

/// Render the input panel based on the current page
///
/// The `ratio` parameter determines the relative size of this panel vs results panel.
pub fn view_input_panel(app: &App, ratio: f32) -> Element<'_, Message> {
    let panel: Column<'_, Message> = match (&app.page, &app.form) {
        (Page::Overview(category), _) => view_overview(*category),
        (Page::Route(Route::Calculator { meta, .. }), Some(form)) => column![
            text(meta.title).size(16),
            text(meta.description).size(11).color([0.5, 0.5, 0.5]),
            Space::new().height(8),
            view_form(form),
        ]
        .spacing(2),
        (Page::Route(Route::ComingSoon { meta, .. }), _) => column![
            text(meta.title).size(16),
            text(meta.description).size(11).color([0.5, 0.5, 0.5]),
            Space::new().height(8),
            text("This calculator is coming soon.").size(12),
        ]
        .spacing(2),
        _ => Column::new().push(text("Page not found").size(14).color([0.5, 0.5, 0.5])),
    };

    let portion = (ratio * 100.0) as u16;

    container(scrollable(panel.padding(8)))
        .width(Length::FillPortion(portion))
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn view_overview(focus: Option<Category>) -> Column<'static, Message> {
    let categories: Vec<Category> = match focus {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    let mut content: Column<'static, Message> = column![].spacing(6);
    if focus.is_none() {
        content = content.push(text("All Calculators").size(16));
    }

    for category in categories {
        content = content.push(
            row![
                text(category.title()).size(14),
                Space::new().width(Length::Fill),
                text(category.href()).size(10).color([0.5, 0.5, 0.5]),
            ]
            .align_y(Alignment::Center),
        );
        content = content.push(text(category.description()).size(11).color([0.5, 0.5, 0.5]));

        let mut list: Column<'static, Message> = column![].spacing(2).padding(Padding::from([2, 8]));
        for meta in catalog::calculators_in(category) {
            let title = if catalog::is_available(meta) {
                text(meta.title).size(11)
            } else {
                text(format!("{} (coming soon)", meta.title)).size(11).color([0.6, 0.6, 0.6])
            };
            list = list.push(
                button(column![title, text(meta.description).size(10).color([0.5, 0.5, 0.5])])
                    .on_press(Message::SelectPage(meta.category, meta.slug))
                    .padding(Padding::from([3, 6]))
                    .style(button::text)
                    .width(Length::Fill),
            );
        }
        content = content.push(list);
        content = content.push(rule::horizontal(1));
    }

    content
}

/// Form generated from the calculator's field and row specs
fn view_form(form: &FormState) -> Column<'_, Message> {
    let mut content: Column<'_, Message> = column![].spacing(6);

    for spec in form.calculator().fields() {
        let key = spec.key;
        content = content.push(view_field(spec, form.value(key), move |s| Message::FieldChanged(key, s)));
    }

    let row_specs = form.calculator().row_fields();
    if !row_specs.is_empty() {
        content = content.push(view_rows(form, row_specs));
    }

    content
}

/// One labeled field. Enumerated kinds get a picker, everything else a text box.
fn view_field<'a>(
    spec: FieldSpec,
    value: &'a str,
    on_change: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    row![
        text(spec.label).size(11).width(Length::Fixed(LABEL_WIDTH)),
        field_widget(spec, value, Length::Fill, on_change),
    ]
    .align_y(Alignment::Center)
    .into()
}

fn field_widget<'a>(
    spec: FieldSpec,
    value: &'a str,
    width: Length,
    on_change: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    match spec.kind {
        FieldKind::Choice(_) | FieldKind::Unit(_) | FieldKind::Currency => {
            let options = spec.options();
            let selected = options.iter().find(|o| o.key == value).copied();
            pick_list(options, selected, move |o: ChoiceOption| on_change(o.key.to_string()))
                .width(width)
                .text_size(11)
                .into()
        }
        _ => text_input(spec.placeholder, value)
            .on_input(on_change)
            .on_submit(Message::Calculate)
            .width(width)
            .padding(4)
            .size(11)
            .into(),
    }
}

/// Course table: one line per row plus an add button
fn view_rows<'a>(form: &'a FormState, specs: &'static [FieldSpec]) -> Column<'a, Message> {
    let mut header = row![].spacing(4);
    for spec in specs {
        header = header.push(text(spec.label).size(10).width(Length::FillPortion(1)));
    }
    header = header.push(Space::new().width(Length::Fixed(24.0)));

    let mut rows: Column<'_, Message> = column![rule::horizontal(1), header].spacing(4);
    let removable = form.rows().len() > 1;

    for (index, values) in form.rows().iter().enumerate() {
        let mut line = row![].spacing(4).align_y(Alignment::Center);
        for spec in specs {
            let key = spec.key;
            let value = values.get(key).map(String::as_str).unwrap_or("");
            line = line.push(field_widget(
                *spec,
                value,
                Length::FillPortion(1),
                move |s| Message::RowFieldChanged(index, key, s),
            ));
        }
        line = line.push(
            button(text("×").size(10))
                .on_press_maybe(removable.then_some(Message::RemoveRow(index)))
                .padding(Padding::from([2, 6]))
                .style(button::secondary),
        );
        rows = rows.push(line);
    }

    rows.push(
        button(text("+ Add Course").size(11))
            .on_press(Message::AddRow)
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
    )
}
