//! Results Panel (Right Side)
//!
//! - Error -> the single user-facing message, in red
//! - Result -> labeled lines, the one-line summary and the copy button
//! - Coming soon -> links back to the category and to all categories

use iced::widget::{button, column, container, row, rule, scrollable, text, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use calc_core::catalog::Route;
use calc_core::Evaluation;

use crate::{App, Message, Page};

/// Render the results panel
///
/// This panel uses the complementary ratio (1 - input_ratio).
pub fn view_results_panel(app: &App, input_ratio: f32) -> Element<'_, Message> {
    let content: Column<'_, Message> = match (&app.page, &app.form) {
        (Page::Route(Route::ComingSoon { meta, category_href, categories_href }), _) => column![
            text("Coming Soon").size(14),
            Space::new().height(8),
            button(text(format!("More {} calculators", meta.category.title())).size(11))
                .on_press(Message::ShowCategory(meta.category))
                .padding(Padding::from([4, 8]))
                .style(button::secondary),
            text(category_href.as_str()).size(10).color([0.5, 0.5, 0.5]),
            Space::new().height(4),
            button(text("All categories").size(11))
                .on_press(Message::ShowCategories)
                .padding(Padding::from([4, 8]))
                .style(button::secondary),
            text(*categories_href).size(10).color([0.5, 0.5, 0.5]),
        ]
        .spacing(2),
        (_, Some(form)) => {
            if let Some(error) = form.error() {
                column![
                    text("Error").size(14),
                    Space::new().height(8),
                    text(error).size(12).color([0.8, 0.2, 0.2]),
                ]
            } else if let Some(result) = form.result() {
                view_evaluation(result, app.copied)
            } else {
                Column::new().push(
                    text("Fill in the form and press Calculate").size(12).color([0.5, 0.5, 0.5]),
                )
            }
        }
        _ => Column::new().push(text("Select a calculator from the left panel").size(12).color([0.5, 0.5, 0.5])),
    };

    let portion = ((1.0 - input_ratio) * 100.0) as u16;

    container(scrollable(content.padding(8)))
        .width(Length::FillPortion(portion))
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn view_evaluation(result: &Evaluation, copied: bool) -> Column<'_, Message> {
    let mut lines: Column<'_, Message> = column![text("Result").size(14), Space::new().height(4)].spacing(3);

    for (i, line) in result.lines.iter().enumerate() {
        // First line is the headline figure
        let size = if i == 0 { 16.0 } else { 11.0 };
        lines = lines.push(
            row![
                text(line.label.as_str()).size(size).width(Length::Fill),
                text(line.value.as_str()).size(size),
            ]
            .align_y(Alignment::Center),
        );
    }

    let copy_label = if copied { "Copied!" } else { "Copy" };
    lines
        .push(Space::new().height(6))
        .push(rule::horizontal(1))
        .push(text(result.summary.as_str()).size(11))
        .push(
            row![
                Space::new().width(Length::Fill),
                button(text(copy_label).size(11))
                    .on_press(Message::CopyResult)
                    .padding(Padding::from([4, 8]))
                    .style(if copied { button::success } else { button::secondary }),
            ]
            .align_y(Alignment::Center),
        )
}
