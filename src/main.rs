use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{event, keyboard, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use tracing::{debug, info, warn};

mod config;
mod error;
mod logging;
mod media;
mod state;
mod ui;

use config::{Config, ThemeChoice};
use media::loader::{self, IMAGE_EXTENSIONS};
use media::{ImageHandle, ResolveError};
use state::{GalleryState, History, ItemId, MediaItem, Ticket, UploadQueue};

/// Main application state
struct GalleryApp {
    /// The gallery store; replaced by each operation
    gallery: GalleryState,
    /// Uploads that are still resolving
    uploads: UploadQueue<ImageHandle>,
    /// Earlier item lists for undo/redo
    history: History<Vec<MediaItem>>,
    theme: ThemeChoice,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the "Upload Images" button
    UploadImages,
    /// A file was dropped on the window
    FileDropped(PathBuf),
    /// Background resolution of an upload finished
    ImageResolved(Ticket, Result<ImageHandle, ResolveError>),
    DeleteItem(ItemId),
    BeginEdit(ItemId),
    DraftChanged(ItemId, String),
    SaveNotes(ItemId),
    /// User clicked a picture
    OpenFocus(ItemId),
    /// Backdrop click, close button or Escape
    CloseFocus,
    /// Copy the image shown in the overlay to the clipboard
    CopyDataUri,
    Undo,
    Redo,
}

impl GalleryApp {
    /// Create a new instance of the application
    fn new(config: Config) -> (Self, Task<Message>) {
        info!(
            upload_order = ?config.upload_order,
            history_limit = config.history_limit,
            "gallery initialized"
        );

        (
            GalleryApp {
                gallery: GalleryState::new(),
                uploads: UploadQueue::new(config.upload_order),
                history: History::new(config.history_limit),
                theme: config.theme,
                status: "Ready.".to_string(),
            },
            Task::none(),
        )
    }

    /// Replace the gallery with the result of an operation
    fn apply(&mut self, op: impl FnOnce(GalleryState) -> GalleryState) {
        self.gallery = op(std::mem::take(&mut self.gallery));
    }

    /// Like `apply`, but remembers the previous items for undo
    fn apply_recorded(&mut self, op: impl FnOnce(GalleryState) -> GalleryState) {
        self.history.record(self.gallery.items().to_vec());
        self.apply(op);
    }

    /// Start resolving files, one background task per file
    fn request_uploads(&mut self, paths: Vec<PathBuf>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = paths
            .into_iter()
            .map(|path| {
                let ticket = self.uploads.reserve();
                info!(?ticket, path = %path.display(), "resolving upload");
                Task::perform(loader::resolve(path), move |result| {
                    Message::ImageResolved(ticket, result)
                })
            })
            .collect();

        self.status = format!("Loading {} image(s)...", self.uploads.pending());
        Task::batch(tasks)
    }

    /// Append uploads released by the queue
    fn add_ready(&mut self, ready: Vec<ImageHandle>) {
        if ready.is_empty() {
            return;
        }
        self.apply_recorded(|gallery| {
            ready
                .into_iter()
                .fold(gallery, |gallery, image| gallery.add_item(image))
        });
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UploadImages => {
                // Show the native file picker
                let files = FileDialog::new()
                    .set_title("Select Images")
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_files();

                if let Some(paths) = files {
                    return self.request_uploads(paths);
                }

                Task::none()
            }
            Message::FileDropped(path) => {
                if loader::has_image_extension(&path) {
                    return self.request_uploads(vec![path]);
                }

                warn!(path = %path.display(), "ignored dropped file");
                self.status = format!("{} is not an image.", path.display());
                Task::none()
            }
            Message::ImageResolved(ticket, result) => {
                match result {
                    Ok(image) => {
                        let ready = self.uploads.complete(ticket, image);
                        self.add_ready(ready);

                        self.status = match self.uploads.pending() {
                            0 => "All images loaded.".to_string(),
                            pending => format!("Loading {} image(s)...", pending),
                        };
                    }
                    Err(err) => {
                        // A failed upload may unblock later ones in request order
                        let ready = self.uploads.fail(ticket);
                        self.add_ready(ready);
                        self.status = format!("Could not add image: {}", err);
                    }
                }
                Task::none()
            }
            Message::DeleteItem(id) => {
                if self.gallery.item(id).is_some() {
                    self.apply_recorded(|gallery| gallery.delete_item(id));
                }
                Task::none()
            }
            Message::BeginEdit(id) => {
                self.apply(|gallery| gallery.begin_edit(id));
                Task::none()
            }
            Message::DraftChanged(id, text) => {
                self.apply(|gallery| gallery.update_draft(id, text));
                Task::none()
            }
            Message::SaveNotes(id) => {
                if self.gallery.item(id).is_some() {
                    self.apply_recorded(|gallery| gallery.save_edit(id));
                }
                Task::none()
            }
            Message::OpenFocus(id) => {
                self.apply(|gallery| gallery.open_focus_by_id(id));
                if let Some(focused) = self.gallery.focused() {
                    debug!(id = %focused.id, "opened overlay");
                }
                Task::none()
            }
            Message::CopyDataUri => {
                if let Some(focused) = self.gallery.focused() {
                    self.status = "Copied image as data URI.".to_string();
                    return iced::clipboard::write(focused.image.to_data_uri());
                }
                Task::none()
            }
            Message::CloseFocus => {
                self.apply(GalleryState::close_focus);
                Task::none()
            }
            Message::Undo => {
                if let Ok(previous) = self.history.undo(self.gallery.items().to_vec()) {
                    self.apply(|gallery| gallery.restore_items(previous));
                    self.status = "Undone.".to_string();
                }
                Task::none()
            }
            Message::Redo => {
                if let Ok(next) = self.history.redo(self.gallery.items().to_vec()) {
                    self.apply(|gallery| gallery.restore_items(next));
                    self.status = "Redone.".to_string();
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let toolbar = row![
            text("Gallery Notes").size(28),
            horizontal_space(),
            button("Undo").on_press_maybe(self.history.can_undo().then_some(Message::Undo)),
            button("Redo").on_press_maybe(self.history.can_redo().then_some(Message::Redo)),
            button("Upload Images")
                .on_press(Message::UploadImages)
                .padding(10),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let summary = format!(
            "{} image(s), {} being edited",
            self.gallery.len(),
            self.gallery.editing_count()
        );

        let content = column![
            toolbar,
            row![text(&self.status).size(14), horizontal_space(), text(summary).size(14)],
            ui::gallery::view(&self.gallery),
        ]
        .spacing(16)
        .padding(20);

        let base: Element<'_, Message> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into();

        match self.gallery.focused() {
            Some(focused) => ui::overlay::view(base, focused),
            None => base,
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.theme {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            keyboard::on_key_press(shortcut),
            event::listen_with(|event, _status, _window| match event {
                Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
                _ => None,
            }),
        ])
    }
}

/// Keyboard shortcuts: Escape closes the overlay, Ctrl/Cmd+Z undoes,
/// Ctrl/Cmd+Shift+Z redoes
fn shortcut(key: keyboard::Key, modifiers: keyboard::Modifiers) -> Option<Message> {
    match key.as_ref() {
        keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::CloseFocus),
        keyboard::Key::Character("z") | keyboard::Key::Character("Z") if modifiers.command() => {
            if modifiers.shift() {
                Some(Message::Redo)
            } else {
                Some(Message::Undo)
            }
        }
        _ => None,
    }
}

fn main() -> iced::Result {
    // Logging starts first so settings problems are reported
    let log_filter = logging::init();
    let config = config::load();
    if let Some(log_filter) = &log_filter {
        log_filter.apply_settings(config.log_filter.as_deref());
    }

    iced::application("Gallery Notes", GalleryApp::update, GalleryApp::view)
        .theme(GalleryApp::theme)
        .subscription(GalleryApp::subscription)
        .centered()
        .run_with(move || GalleryApp::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::handle::tests::{sample_handle, sample_png_bytes};
    use crate::state::UploadOrder;

    fn app(order: UploadOrder) -> GalleryApp {
        let config = Config {
            upload_order: order,
            ..Config::default()
        };
        GalleryApp::new(config).0
    }

    fn handle(width: u32) -> ImageHandle {
        ImageHandle::decode(sample_png_bytes(width, 1)).unwrap()
    }

    fn widths(app: &GalleryApp) -> Vec<u32> {
        app.gallery.items().iter().map(|i| i.image.dimensions().0).collect()
    }

    #[test]
    fn test_out_of_order_resolution_appends_in_completion_order() {
        let mut app = app(UploadOrder::Completion);
        let first = app.uploads.reserve();
        let second = app.uploads.reserve();

        let _ = app.update(Message::ImageResolved(second, Ok(handle(2))));
        let _ = app.update(Message::ImageResolved(first, Ok(handle(1))));

        assert_eq!(widths(&app), vec![2, 1]);
    }

    #[test]
    fn test_request_order_keeps_initiation_order() {
        let mut app = app(UploadOrder::Request);
        let first = app.uploads.reserve();
        let second = app.uploads.reserve();

        let _ = app.update(Message::ImageResolved(second, Ok(handle(2))));
        assert!(app.gallery.is_empty());
        let _ = app.update(Message::ImageResolved(first, Ok(handle(1))));

        assert_eq!(widths(&app), vec![1, 2]);
    }

    #[test]
    fn test_failed_resolution_adds_nothing() {
        let mut app = app(UploadOrder::Completion);
        let ticket = app.uploads.reserve();

        let _ = app.update(Message::ImageResolved(ticket, Err(ResolveError::UnsupportedFormat)));

        assert!(app.gallery.is_empty());
        assert!(app.status.starts_with("Could not add image"));
        assert_eq!(app.uploads.pending(), 0);
    }

    #[test]
    fn test_undo_delete_restores_item() {
        let mut app = app(UploadOrder::Completion);
        let ticket = app.uploads.reserve();
        let _ = app.update(Message::ImageResolved(ticket, Ok(sample_handle())));
        let id = app.gallery.items()[0].id;

        let _ = app.update(Message::DeleteItem(id));
        assert!(app.gallery.is_empty());

        let _ = app.update(Message::Undo);
        assert_eq!(app.gallery.items()[0].id, id);

        let _ = app.update(Message::Redo);
        assert!(app.gallery.is_empty());
    }

    fn app_with_two_items() -> (GalleryApp, ItemId, ItemId) {
        let mut app = app(UploadOrder::Completion);
        for width in [1, 2] {
            let ticket = app.uploads.reserve();
            let _ = app.update(Message::ImageResolved(ticket, Ok(handle(width))));
        }
        let a = app.gallery.items()[0].id;
        let b = app.gallery.items()[1].id;
        (app, a, b)
    }

    #[test]
    fn test_undo_does_not_reopen_closed_overlay() {
        let (mut app, a, b) = app_with_two_items();

        let _ = app.update(Message::OpenFocus(a));
        let _ = app.update(Message::DeleteItem(b));
        let _ = app.update(Message::CloseFocus);
        let _ = app.update(Message::Undo);

        assert_eq!(app.gallery.len(), 2);
        assert!(app.gallery.focused().is_none());

        let _ = app.update(Message::OpenFocus(a));
        let _ = app.update(Message::Redo);
        assert_eq!(app.gallery.len(), 1);
        assert_eq!(app.gallery.focused().map(|f| f.id), Some(a));
    }

    #[test]
    fn test_undo_keeps_draft_typed_after_snapshot() {
        let (mut app, a, b) = app_with_two_items();

        let _ = app.update(Message::BeginEdit(a));
        let _ = app.update(Message::DeleteItem(b));
        let _ = app.update(Message::DraftChanged(a, "typed after delete".to_string()));
        let _ = app.update(Message::Undo);

        assert_eq!(app.gallery.len(), 2);
        assert!(app.gallery.item(a).unwrap().is_editing());
        assert_eq!(app.gallery.draft(a), Some("typed after delete"));
    }

    #[test]
    fn test_notes_flow_through_messages() {
        let mut app = app(UploadOrder::Completion);
        let ticket = app.uploads.reserve();
        let _ = app.update(Message::ImageResolved(ticket, Ok(sample_handle())));
        let id = app.gallery.items()[0].id;

        let _ = app.update(Message::BeginEdit(id));
        let _ = app.update(Message::DraftChanged(id, "beach".to_string()));
        let _ = app.update(Message::OpenFocus(id));
        let _ = app.update(Message::SaveNotes(id));

        assert_eq!(app.gallery.item(id).unwrap().notes, "beach");
        assert_eq!(app.gallery.focused().unwrap().notes, "");

        let _ = app.update(Message::CloseFocus);
        assert!(app.gallery.focused().is_none());
    }

    #[test]
    fn test_shortcuts() {
        let none = keyboard::Modifiers::empty();
        let escape = keyboard::Key::Named(keyboard::key::Named::Escape);
        assert!(matches!(shortcut(escape, none), Some(Message::CloseFocus)));

        let z = keyboard::Key::Character("z".into());
        assert!(shortcut(z.clone(), none).is_none());
        assert!(matches!(shortcut(z.clone(), keyboard::Modifiers::COMMAND), Some(Message::Undo)));
        assert!(matches!(
            shortcut(z, keyboard::Modifiers::COMMAND | keyboard::Modifiers::SHIFT),
            Some(Message::Redo)
        ));
    }
}
