use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Program};
use iced::widget::{button, canvas as canvas_widget, column, container, image, opaque, responsive, row, stack, text, Space};
use iced::{Color, ContentFit, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use crate::state::FocusedItem;
use crate::Message;

/// Share of the window taken by the content region
const CONTENT_FRACTION: f32 = 0.8;
const CONTENT_MAX_WIDTH: f32 = 1400.0;
const CONTENT_MAX_HEIGHT: f32 = 1000.0;

/// The two parts of the overlay a click can land in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The enlarged image and its notes; clicks here never close the overlay
    Content,
    /// Everything around the content
    Backdrop,
}

/// Where the content region sits for a given window size.
///
/// Both the hit test and the layout of the content use this rectangle.
pub fn content_bounds(viewport: Size) -> Rectangle {
    let width = (viewport.width * CONTENT_FRACTION).min(CONTENT_MAX_WIDTH);
    let height = (viewport.height * CONTENT_FRACTION).min(CONTENT_MAX_HEIGHT);

    Rectangle {
        x: (viewport.width - width) / 2.0,
        y: (viewport.height - height) / 2.0,
        width,
        height,
    }
}

/// Classify a point relative to the overlay's top-left corner
pub fn hit_test(viewport: Size, point: Point) -> Region {
    if content_bounds(viewport).contains(point) {
        Region::Content
    } else {
        Region::Backdrop
    }
}

/// Dimmed layer under the content that closes the overlay on backdrop clicks
pub struct Backdrop;

impl Program<Message> for Backdrop {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::from_rgba(0.0, 0.0, 0.0, 0.8));
        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        if let canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(position) = cursor.position_in(bounds) {
                return match hit_test(bounds.size(), position) {
                    Region::Backdrop => (canvas::event::Status::Captured, Some(Message::CloseFocus)),
                    Region::Content => (canvas::event::Status::Ignored, None),
                };
            }
        }

        (canvas::event::Status::Ignored, None)
    }
}

/// Stack the overlay for `focused` on top of `base`
pub fn view<'a>(base: Element<'a, Message>, focused: &'a FocusedItem) -> Element<'a, Message> {
    let backdrop = canvas_widget(Backdrop).width(Length::Fill).height(Length::Fill);

    let content = responsive(move |viewport| {
        let bounds = content_bounds(viewport);

        let card = container(content_card(focused))
            .width(Length::Fixed(bounds.width))
            .height(Length::Fixed(bounds.height));

        container(card).center(Length::Fill).into()
    });

    // opaque keeps clicks from reaching the gallery underneath
    stack![base, opaque(backdrop), content].into()
}

fn content_card(focused: &FocusedItem) -> Element<'_, Message> {
    let close = row![
        button("Copy as data URI").on_press(Message::CopyDataUri).style(button::secondary),
        Space::with_width(Length::Fill),
        button("X").on_press(Message::CloseFocus).style(button::secondary),
    ];

    let picture = image(focused.image.widget_handle())
        .content_fit(ContentFit::Contain)
        .width(Length::Fill)
        .height(Length::Fill);

    container(
        column![close, picture, text(focused.notes.as_str()).size(16)]
            .spacing(10),
    )
    .padding(16)
    .width(Length::Fill)
    .height(Length::Fill)
    .style(container::rounded_box)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Size {
        Size::new(1000.0, 800.0)
    }

    #[test]
    fn test_center_is_content() {
        assert_eq!(hit_test(viewport(), Point::new(500.0, 400.0)), Region::Content);
    }

    #[test]
    fn test_corner_is_backdrop() {
        assert_eq!(hit_test(viewport(), Point::new(5.0, 5.0)), Region::Backdrop);
        assert_eq!(hit_test(viewport(), Point::new(995.0, 795.0)), Region::Backdrop);
    }

    #[test]
    fn test_content_is_centered() {
        let bounds = content_bounds(viewport());
        assert_eq!(bounds.width, 800.0);
        assert_eq!(bounds.height, 640.0);
        assert_eq!(bounds.x, 100.0);
        assert_eq!(bounds.y, 80.0);
    }

    #[test]
    fn test_content_is_capped_on_large_windows() {
        let bounds = content_bounds(Size::new(4000.0, 3000.0));
        assert_eq!(bounds.width, CONTENT_MAX_WIDTH);
        assert_eq!(bounds.height, CONTENT_MAX_HEIGHT);
        assert_eq!(hit_test(Size::new(4000.0, 3000.0), Point::new(100.0, 1500.0)), Region::Backdrop);
    }
}
