//! # Calcfolio GUI Application
//!
//! Graphical front end for the calc_core catalog, built with Iced for native
//! desktops and WASM.
//!
//! Layout: toolbar on top, category sidebar on the left, the selected
//! calculator's form in the centre, its result card on the right, and a
//! status bar along the bottom.

mod ui;

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use iced::widget::{column, row, Space};
use iced::{Element, Length, Subscription, Task, Theme};

use calc_core::catalog::{self, Category, Route};
use calc_core::{CalcResult, Clipboard, FormState, Settings};

/// Width of the category sidebar
const SIDEBAR_WIDTH: f32 = 220.0;

/// Input panel share of the space right of the sidebar
const INPUT_RATIO: f32 = 0.55;

/// How often the copy confirmation is re-checked while visible
const COPY_TICK: Duration = Duration::from_millis(100);

pub fn main() -> iced::Result {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    iced::application(App::new, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .subscription(App::subscription)
        .window_size(iced::Size::new(1180.0, 720.0))
        .run()
}

/// What the centre and right panels show.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// Category overview (all categories, or one)
    Overview(Option<Category>),
    /// A resolved catalog route
    Route(Route),
}

#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    ToggleCategory(Category),
    SelectPage(Category, &'static str),
    ShowCategory(Category),
    ShowCategories,

    // Form editing
    FieldChanged(&'static str, String),
    RowFieldChanged(usize, &'static str, String),
    AddRow,
    RemoveRow(usize),

    // Actions
    Calculate,
    Reset,
    CopyResult,
    CopyTick,

    // Settings
    ToggleSettingsMenu,
    ToggleDarkMode,
}

/// Stages the summary for an Iced clipboard task.
#[derive(Default)]
struct StagedClipboard {
    text: Option<String>,
}

impl Clipboard for StagedClipboard {
    fn write_text(&mut self, text: &str) -> CalcResult<()> {
        self.text = Some(text.to_string());
        Ok(())
    }
}

pub struct App {
    pub settings: Settings,
    pub page: Page,
    pub form: Option<FormState>,
    pub collapsed: HashSet<Category>,
    pub dark_mode: bool,
    pub settings_menu_open: bool,
    /// Whether the "Copied!" confirmation is showing
    pub copied: bool,
    pub status: String,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let settings = load_settings();
        let app = App {
            settings,
            page: Page::Overview(None),
            form: None,
            collapsed: HashSet::new(),
            dark_mode: false,
            settings_menu_open: false,
            copied: false,
            status: "Ready".to_string(),
        };
        (app, Task::none())
    }

    fn title(&self) -> String {
        match self.page.meta() {
            Some(meta) => format!("Calcfolio - {}", meta.title),
            None => "Calcfolio".to_string(),
        }
    }

    fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.copied {
            iced::time::every(COPY_TICK).map(|_| Message::CopyTick)
        } else {
            Subscription::none()
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ToggleCategory(category) => {
                if !self.collapsed.remove(&category) {
                    self.collapsed.insert(category);
                }
            }
            Message::SelectPage(category, slug) => {
                let route = catalog::resolve(category.slug(), slug);
                self.form = match &route {
                    Route::Calculator { id, .. } => Some(FormState::new(*id)),
                    _ => None,
                };
                self.status = match &route {
                    Route::Calculator { meta, .. } => meta.description.to_string(),
                    Route::ComingSoon { meta, .. } => format!("{} is coming soon", meta.title),
                    Route::NotFound => format!("No page at {}/{}", category.slug(), slug),
                };
                self.copied = false;
                self.page = Page::Route(route);
            }
            Message::ShowCategory(category) => {
                self.collapsed.remove(&category);
                self.form = None;
                self.page = Page::Overview(Some(category));
            }
            Message::ShowCategories => {
                self.settings_menu_open = false;
                self.form = None;
                self.page = Page::Overview(None);
            }
            Message::FieldChanged(key, value) => {
                if let Some(form) = &mut self.form {
                    if form.set_field(key, &value) {
                        self.copied = false;
                    }
                }
            }
            Message::RowFieldChanged(index, key, value) => {
                if let Some(form) = &mut self.form {
                    if form.set_row_field(index, key, &value) {
                        self.copied = false;
                    }
                }
            }
            Message::AddRow => {
                if let Some(form) = &mut self.form {
                    form.add_row();
                    self.copied = false;
                }
            }
            Message::RemoveRow(index) => {
                if let Some(form) = &mut self.form {
                    if form.remove_row(index) {
                        self.copied = false;
                    }
                }
            }
            Message::Calculate => {
                if let Some(form) = &mut self.form {
                    self.copied = false;
                    self.status = if form.compute(&self.settings) {
                        "Calculated".to_string()
                    } else {
                        "Check your input".to_string()
                    };
                }
            }
            Message::Reset => {
                if let Some(form) = &mut self.form {
                    form.reset();
                    self.copied = false;
                    self.status = "Form reset".to_string();
                }
            }
            Message::CopyResult => {
                if let Some(form) = &mut self.form {
                    let mut staged = StagedClipboard::default();
                    if form.copy_result(&mut staged, Utc::now()) {
                        self.copied = true;
                        if let Some(text) = staged.text {
                            tracing::debug!(len = text.len(), "copying result summary");
                            return iced::clipboard::write(text);
                        }
                    }
                }
            }
            Message::CopyTick => {
                self.copied = self
                    .form
                    .as_ref()
                    .is_some_and(|f| f.is_copied(Utc::now(), &self.settings));
            }
            Message::ToggleSettingsMenu => {
                self.settings_menu_open = !self.settings_menu_open;
            }
            Message::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                self.settings_menu_open = false;
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let mut header = column![
            ui::toolbar::view_header(self.title()),
            ui::toolbar::view_toolbar(
                self.form.is_some(),
                self.has_result(),
                self.copied,
                self.settings_menu_open,
            ),
        ];
        if self.settings_menu_open {
            header = header.push(row![
                Space::new().width(Length::Fill),
                ui::toolbar::view_settings_menu(self.dark_mode),
            ]);
        }

        let body = row![
            ui::catalog_panel::view_catalog_panel(self, SIDEBAR_WIDTH),
            ui::input_panel::view_input_panel(self, INPUT_RATIO),
            ui::results_panel::view_results_panel(self, INPUT_RATIO),
        ]
        .spacing(8)
        .height(Length::Fill);

        column![
            header,
            body,
            ui::status_bar::view_status_bar(&self.status, self.page.meta()),
        ]
        .spacing(6)
        .padding(10)
        .into()
    }

    fn has_result(&self) -> bool {
        self.form.as_ref().is_some_and(|f| f.result().is_some())
    }
}

impl Page {
    pub fn meta(&self) -> Option<&'static catalog::PageMeta> {
        match self {
            Page::Route(route) => route.meta(),
            Page::Overview(_) => None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings() -> Settings {
    match std::env::var_os("CALCFOLIO_CONFIG") {
        Some(path) => Settings::load(std::path::Path::new(&path)).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default settings");
            Settings::default()
        }),
        None => Settings::default(),
    }
}

#[cfg(target_arch = "wasm32")]
fn load_settings() -> Settings {
    Settings::default()
}
