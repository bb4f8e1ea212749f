//! Status Bar (Bottom)
//!
//! Displays the current page path and the latest status message.

use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use calc_core::catalog::{PageMeta, CATEGORIES_HREF};

use crate::Message;

/// Render the status bar
pub fn view_status_bar<'a>(status: &'a str, page: Option<&'static PageMeta>) -> Element<'a, Message> {
    let location = match page {
        Some(meta) => meta.href(),
        None => CATEGORIES_HREF.to_string(),
    };

    let availability = match page {
        Some(meta) if !calc_core::catalog::is_available(meta) => " [coming soon]",
        _ => "",
    };

    row![
        text(location).size(10),
        text(availability).size(10).color([0.6, 0.3, 0.0]),
        Space::new().width(Length::Fill),
        text(status).size(10),
    ]
    .padding(Padding::from([4, 0]))
    .into()
}
