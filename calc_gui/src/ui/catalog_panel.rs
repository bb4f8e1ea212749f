//! Catalog Panel (Left Sidebar)
//!
//! One collapsible section per category. Implemented calculators are
//! clickable; coming-soon pages are listed grayed out but still open their
//! placeholder page.

use iced::widget::{button, column, container, row, rule, scrollable, text, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use calc_core::catalog::{self, Category, PageMeta};

use crate::{App, Message};

/// Render the catalog panel (left sidebar)
pub fn view_catalog_panel(app: &App, width: f32) -> Element<'_, Message> {
    let mut panel_content: Column<'_, Message> = column![].spacing(2);
    let selected = app.page.meta();

    for (i, category) in Category::ALL.iter().copied().enumerate() {
        if i > 0 {
            panel_content = panel_content.push(rule::horizontal(1));
        }

        let expanded = !app.collapsed.contains(&category);
        let pages = catalog::calculators_in(category);
        panel_content = panel_content.push(view_section_header(category, expanded, pages.len()));

        if expanded {
            let mut list: Column<'_, Message> = column![].spacing(2).padding(Padding::from([4, 8]));
            for meta in pages {
                let is_selected = selected.is_some_and(|s| s == meta);
                list = list.push(view_page_button(meta, is_selected));
            }
            panel_content = panel_content.push(list);
        }
    }

    container(scrollable(panel_content.padding(4)))
        .width(Length::Fixed(width))
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(4)
        .into()
}

/// Collapsible category header with expand/collapse indicator
fn view_section_header(category: Category, expanded: bool, count: usize) -> Element<'static, Message> {
    let indicator = if expanded { "▼" } else { "▶" };
    let toggle = button(
        row![
            text(indicator).size(10),
            Space::new().width(4),
            text(format!("{} ({})", category.title(), count)).size(11),
        ]
        .align_y(Alignment::Center),
    )
    .on_press(Message::ToggleCategory(category))
    .padding(Padding::from([4, 6]))
    .style(button::text)
    .width(Length::Fill);

    row![
        toggle,
        button(text("»").size(11))
            .on_press(Message::ShowCategory(category))
            .padding(Padding::from([2, 6]))
            .style(button::secondary),
    ]
    .spacing(2)
    .into()
}

fn view_page_button(meta: &'static PageMeta, is_selected: bool) -> Element<'static, Message> {
    let label = if catalog::is_available(meta) {
        text(meta.title).size(10)
    } else {
        text(meta.title).size(10).color([0.6, 0.6, 0.6])
    };

    button(label)
        .on_press(Message::SelectPage(meta.category, meta.slug))
        .padding(Padding::from([3, 6]))
        .style(if is_selected { button::primary } else { button::secondary })
        .width(Length::Fill)
        .into()
}
