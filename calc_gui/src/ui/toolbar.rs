//! Toolbar component
//!
//! Application header, form actions (Calculate, Reset, Copy) and the
//! settings dropdown.

use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use crate::Message;

/// Render the application header with the current page title
pub fn view_header(window_title: String) -> Element<'static, Message> {
    row![
        text("Calcfolio").size(28),
        Space::new().width(Length::Fill),
        text(window_title).size(14),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Render the toolbar.
///
/// Form actions are disabled (no `on_press`) when there is no form, and
/// Copy only becomes active once a result exists.
pub fn view_toolbar(
    has_form: bool,
    has_result: bool,
    copied: bool,
    settings_menu_open: bool,
) -> Element<'static, Message> {
    let calculate = button(text("Calculate").size(11))
        .on_press_maybe(has_form.then_some(Message::Calculate))
        .padding(Padding::from([4, 8]))
        .style(button::primary);

    let reset = button(text("Reset").size(11))
        .on_press_maybe(has_form.then_some(Message::Reset))
        .padding(Padding::from([4, 8]))
        .style(button::secondary);

    let copy_label = if copied { "Copied!" } else { "Copy Result" };
    let copy = button(text(copy_label).size(11))
        .on_press_maybe(has_result.then_some(Message::CopyResult))
        .padding(Padding::from([4, 8]))
        .style(if copied { button::success } else { button::secondary });

    let form_buttons = row![calculate, reset, copy].spacing(4);

    let settings_button_text = if settings_menu_open { "Settings ▲" } else { "Settings ▼" };
    let settings_button = button(text(settings_button_text).size(11))
        .on_press(Message::ToggleSettingsMenu)
        .padding(Padding::from([4, 8]))
        .style(if settings_menu_open { button::primary } else { button::secondary });

    row![
        form_buttons,
        Space::new().width(Length::Fill),
        settings_button,
    ]
    .padding(Padding::from([4, 0]))
    .align_y(Alignment::Center)
    .into()
}

/// Render the settings dropdown menu
pub fn view_settings_menu(dark_mode: bool) -> Element<'static, Message> {
    let theme_label = if dark_mode { "Light Mode" } else { "Dark Mode" };

    let dropdown_content = column![
        button(text(theme_label).size(10))
            .on_press(Message::ToggleDarkMode)
            .padding(Padding::from([4, 12]))
            .width(Length::Fill)
            .style(button::secondary),
        button(text("All Categories").size(10))
            .on_press(Message::ShowCategories)
            .padding(Padding::from([4, 12]))
            .width(Length::Fill)
            .style(button::secondary),
    ]
    .spacing(2)
    .width(Length::Fixed(130.0));

    container(dropdown_content)
        .padding(4)
        .style(container::bordered_box)
        .into()
}
