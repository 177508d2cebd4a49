use gpui::{
    App, Bounds, CursorStyle, ElementId, ElementInputHandler, Entity, EntityInputHandler,
    FocusHandle, Focusable, GlobalElementId, KeyDownEvent, LayoutId, PaintQuad, Pixels, Point,
    ShapedLine, SharedString, Style, TextRun, UTF16Selection, Window, div, point, prelude::*, px,
    relative, size,
};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

type OnChange = Box<dyn Fn(String, &mut Context<TextField>)>;

/// Plain text input backing the title and content boxes of the input view.
pub struct TextField {
    focus_handle: FocusHandle,
    content: SharedString,
    placeholder: SharedString,
    multiline: bool,
    selected_range: Range<usize>,
    selection_reversed: bool,
    on_change: Option<OnChange>,
}

impl TextField {
    pub fn new(placeholder: impl Into<SharedString>, multiline: bool, cx: &mut Context<Self>) -> Self {
        Self {
            focus_handle: cx.focus_handle(),
            content: SharedString::default(),
            placeholder: placeholder.into(),
            multiline,
            selected_range: 0..0,
            selection_reversed: false,
            on_change: None,
        }
    }

    pub fn set_content(&mut self, content: impl Into<SharedString>, cx: &mut Context<Self>) {
        self.content = content.into();
        self.selected_range = self.content.len()..self.content.len();
        self.selection_reversed = false;
        cx.notify();
    }

    pub fn set_on_change<F>(&mut self, callback: F)
    where
        F: Fn(String, &mut Context<TextField>) + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    pub fn focus(&self, window: &mut Window) {
        self.focus_handle.focus(window);
    }

    fn cursor_offset(&self) -> usize {
        if self.selection_reversed {
            self.selected_range.start
        } else {
            self.selected_range.end
        }
    }

    fn previous_boundary(&self, offset: usize) -> usize {
        self.content
            .grapheme_indices(true)
            .rev()
            .find_map(|(idx, _)| (idx < offset).then_some(idx))
            .unwrap_or(0)
    }

    fn next_boundary(&self, offset: usize) -> usize {
        self.content
            .grapheme_indices(true)
            .find_map(|(idx, _)| (idx > offset).then_some(idx))
            .unwrap_or(self.content.len())
    }

    fn move_to(&mut self, offset: usize, cx: &mut Context<Self>) {
        self.selected_range = offset..offset;
        self.selection_reversed = false;
        cx.notify();
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        match event.keystroke.key.as_str() {
            "backspace" => {
                if self.selected_range.is_empty() {
                    let start = self.previous_boundary(self.cursor_offset());
                    self.selected_range = start..self.selected_range.end;
                }
                self.replace_text_in_range(None, "", window, cx);
            }
            "delete" => {
                if self.selected_range.is_empty() {
                    let end = self.next_boundary(self.cursor_offset());
                    self.selected_range = self.selected_range.start..end;
                }
                self.replace_text_in_range(None, "", window, cx);
            }
            "left" => {
                let offset = if self.selected_range.is_empty() {
                    self.previous_boundary(self.cursor_offset())
                } else {
                    self.selected_range.start
                };
                self.move_to(offset, cx);
            }
            "right" => {
                let offset = if self.selected_range.is_empty() {
                    self.next_boundary(self.cursor_offset())
                } else {
                    self.selected_range.end
                };
                self.move_to(offset, cx);
            }
            "enter" if self.multiline => {
                self.replace_text_in_range(None, "\n", window, cx);
            }
            _ => {}
        }
    }

    fn offset_from_utf16(&self, offset: usize) -> usize {
        let mut utf8_offset = 0;
        let mut utf16_count = 0;

        for ch in self.content.chars() {
            if utf16_count >= offset {
                break;
            }
            utf16_count += ch.len_utf16();
            utf8_offset += ch.len_utf8();
        }

        utf8_offset
    }

    fn offset_to_utf16(&self, offset: usize) -> usize {
        self.content[..offset].chars().map(char::len_utf16).sum()
    }

    fn range_to_utf16(&self, range: &Range<usize>) -> Range<usize> {
        self.offset_to_utf16(range.start)..self.offset_to_utf16(range.end)
    }

    fn range_from_utf16(&self, range_utf16: &Range<usize>) -> Range<usize> {
        self.offset_from_utf16(range_utf16.start)..self.offset_from_utf16(range_utf16.end)
    }
}

impl EntityInputHandler for TextField {
    fn text_for_range(
        &mut self,
        range_utf16: Range<usize>,
        actual_range: &mut Option<Range<usize>>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<String> {
        let range = self.range_from_utf16(&range_utf16);
        actual_range.replace(self.range_to_utf16(&range));
        Some(self.content[range].to_string())
    }

    fn selected_text_range(
        &mut self,
        _ignore_disabled_input: bool,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<UTF16Selection> {
        Some(UTF16Selection {
            range: self.range_to_utf16(&self.selected_range),
            reversed: self.selection_reversed,
        })
    }

    fn marked_text_range(
        &self,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Range<usize>> {
        None
    }

    fn unmark_text(&mut self, _window: &mut Window, _cx: &mut Context<Self>) {}

    fn replace_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        _: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !self.multiline && new_text.contains('\n') {
            return;
        }

        let range = range_utf16
            .as_ref()
            .map(|range_utf16| self.range_from_utf16(range_utf16))
            .unwrap_or(self.selected_range.clone());

        self.content =
            (self.content[0..range.start].to_owned() + new_text + &self.content[range.end..])
                .into();
        self.selected_range = range.start + new_text.len()..range.start + new_text.len();
        self.selection_reversed = false;

        if let Some(on_change) = &self.on_change {
            on_change(self.content.to_string(), cx);
        }

        cx.notify();
    }

    fn replace_and_mark_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        _new_selected_range: Option<Range<usize>>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.replace_text_in_range(range_utf16, new_text, window, cx);
    }

    fn bounds_for_range(
        &mut self,
        _range_utf16: Range<usize>,
        bounds: Bounds<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Bounds<Pixels>> {
        Some(bounds)
    }

    fn character_index_for_point(
        &mut self,
        _point: Point<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<usize> {
        Some(self.offset_to_utf16(self.content.len()))
    }
}

impl Focusable for TextField {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for TextField {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .w_full()
            .cursor(CursorStyle::IBeam)
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(Self::on_key_down))
            .child(TextFieldView {
                field: cx.entity().clone(),
            })
    }
}

struct TextFieldView {
    field: Entity<TextField>,
}

impl IntoElement for TextFieldView {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

struct TextFieldPrepaintState {
    lines: Vec<ShapedLine>,
    cursor: Option<PaintQuad>,
}

impl Element for TextFieldView {
    type RequestLayoutState = ();
    type PrepaintState = Option<TextFieldPrepaintState>;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let field = self.field.read(cx);
        let line_count = if field.multiline {
            field.content.split('\n').count().max(6)
        } else {
            1
        };

        let mut style = Style::default();
        style.size.width = relative(1.).into();
        style.size.height = (window.line_height() * line_count as f32).into();
        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let field = self.field.read(cx);
        let style = window.text_style();
        let font_size = style.font_size.to_pixels(window.rem_size());
        let line_height = window.line_height();

        let (text, color) = if field.content.is_empty() {
            (field.placeholder.to_string(), style.color.opacity(0.4))
        } else {
            (field.content.to_string(), style.color)
        };

        let mut lines = Vec::new();
        for line in text.split('\n') {
            let run = TextRun {
                len: line.len(),
                font: style.font(),
                color,
                background_color: None,
                underline: None,
                strikethrough: None,
            };
            let shaped = window
                .text_system()
                .shape_line(SharedString::from(line.to_string()), font_size, &[run])
                .ok()?;
            lines.push(shaped);
        }

        let cursor = if field.focus_handle.is_focused(window) && field.selected_range.is_empty() {
            let offset = if field.content.is_empty() {
                0
            } else {
                field.cursor_offset()
            };
            let before = &field.content[..offset];
            let row = before.matches('\n').count();
            let column = before.rfind('\n').map_or(offset, |nl| offset - nl - 1);
            let x = if field.content.is_empty() {
                px(0.)
            } else {
                lines.get(row).map_or(px(0.), |line| line.x_for_index(column))
            };

            Some(gpui::fill(
                Bounds::new(
                    point(bounds.left() + x, bounds.top() + line_height * row as f32),
                    size(px(2.), line_height),
                ),
                gpui::blue(),
            ))
        } else {
            None
        };

        Some(TextFieldPrepaintState { lines, cursor })
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let focus_handle = self.field.read(cx).focus_handle.clone();

        window.handle_input(
            &focus_handle,
            ElementInputHandler::new(bounds, self.field.clone()),
            cx,
        );

        let Some(state) = prepaint.take() else {
            return;
        };

        let line_height = window.line_height();
        for (row, line) in state.lines.iter().enumerate() {
            let origin = point(bounds.left(), bounds.top() + line_height * row as f32);
            if let Err(e) = line.paint(origin, line_height, window, cx) {
                tracing::warn!("Failed to paint text line: {}", e);
            }
        }

        if focus_handle.is_focused(window) {
            if let Some(cursor) = state.cursor {
                window.paint_quad(cursor);
            }
        }
    }
}
