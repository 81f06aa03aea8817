use iced::widget::{button, column, container, image, mouse_area, scrollable, text, text_input};
use iced::{Alignment, ContentFit, Element, Length};
use iced_aw::Wrap;

use crate::state::{EditState, GalleryState, MediaItem};
use crate::Message;

/// Width and height of each picture in the grid
const THUMBNAIL_SIZE: f32 = 220.0;

/// Grid of cards, one per gallery item
pub fn view(gallery: &GalleryState) -> Element<'_, Message> {
    if gallery.is_empty() {
        return container(text("No images yet. Upload one to get started.").size(18))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    }

    let cards: Vec<Element<'_, Message>> = gallery
        .items()
        .iter()
        .map(|item| card(item, gallery.draft(item.id)))
        .collect();

    scrollable(
        container(Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0))
            .padding(20)
            .width(Length::Fill),
    )
    .height(Length::Fill)
    .into()
}

fn card<'a>(item: &'a MediaItem, draft: Option<&'a str>) -> Element<'a, Message> {
    let id = item.id;

    // Clicking the picture opens the overlay
    let picture = mouse_area(
        image(item.image.widget_handle())
            .content_fit(ContentFit::Cover)
            .width(Length::Fixed(THUMBNAIL_SIZE))
            .height(Length::Fixed(THUMBNAIL_SIZE)),
    )
    .on_press(Message::OpenFocus(id));

    let (width, height) = item.image.dimensions();
    let kind = item
        .image
        .format()
        .extensions_str()
        .first()
        .map(|ext| ext.to_uppercase())
        .unwrap_or_default();
    let caption = format!(
        "{} {}×{} · added {}",
        kind,
        width,
        height,
        item.added_at.format("%H:%M")
    );

    let notes: Element<'a, Message> = match item.edit_state {
        EditState::Editing => column![
            text_input("Write notes here...", draft.unwrap_or(""))
                .on_input(move |text| Message::DraftChanged(id, text))
                .on_submit(Message::SaveNotes(id)),
            button("Save").on_press(Message::SaveNotes(id)),
        ]
        .spacing(6)
        .into(),
        EditState::Viewing => {
            let label = if item.notes.is_empty() { "Add Notes" } else { "Edit Notes" };
            column![
                text(item.notes.as_str()),
                button(label).on_press(Message::BeginEdit(id)),
            ]
            .spacing(6)
            .into()
        }
    };

    container(
        column![
            picture,
            text(caption).size(12),
            notes,
            button("Delete").on_press(Message::DeleteItem(id)).style(button::danger),
        ]
        .spacing(8)
        .width(Length::Fixed(THUMBNAIL_SIZE))
        .align_x(Alignment::Start),
    )
    .padding(10)
    .style(container::rounded_box)
    .into()
}
