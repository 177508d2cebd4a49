use std::collections::HashSet;

use gpui::{
    App, Div, Entity, FocusHandle, Focusable, FontWeight, MouseButton, MouseDownEvent, Window, div,
    prelude::*, px,
};
use tracing::{debug, warn};

use crate::components::{Palette, TextField};
use crate::config::AppConfig;
use crate::models::{Bucket, Note, NoteGroups, NoteId, NoteStore, Theme, format_date};
use crate::util::dump_notes;

/// Root view. Every handler forwards to the store and then re-renders, so the
/// buckets are regrouped from the store on each frame.
pub struct NoteApp {
    store: NoteStore,
    config: AppConfig,
    theme: Theme,
    expanded: HashSet<NoteId>,
    title_field: Entity<TextField>,
    content_field: Entity<TextField>,
    focus_handle: FocusHandle,
}

impl NoteApp {
    pub fn new(config: AppConfig, cx: &mut Context<Self>) -> Self {
        let title_placeholder = config.labels.title_placeholder.clone();
        let content_placeholder = config.labels.content_placeholder.clone();
        let title_field = cx.new(|cx| TextField::new(title_placeholder, false, cx));
        let content_field = cx.new(|cx| TextField::new(content_placeholder, true, cx));

        let app = cx.entity().downgrade();
        title_field.update(cx, move |field, _cx| {
            field.set_on_change(move |title, cx| {
                let _ = app.update(cx, |app, cx| {
                    app.store.update_draft_title(title);
                    cx.notify();
                });
            });
        });

        let app = cx.entity().downgrade();
        content_field.update(cx, move |field, _cx| {
            field.set_on_change(move |content, cx| {
                let _ = app.update(cx, |app, cx| {
                    app.store.update_draft_content(content);
                    cx.notify();
                });
            });
        });

        debug!("Starting with theme {:?}", config.theme);

        Self {
            store: NoteStore::new(),
            theme: config.theme,
            config,
            expanded: HashSet::new(),
            title_field,
            content_field,
            focus_handle: cx.focus_handle(),
        }
    }

    pub fn start_create(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.store.start_create();
        self.load_draft_into_fields(window, cx);
        cx.notify();
    }

    pub fn start_edit(&mut self, id: NoteId, window: &mut Window, cx: &mut Context<Self>) {
        if let Err(e) = self.store.start_edit(id) {
            warn!("Ignoring edit request: {}", e);
            return;
        }
        self.load_draft_into_fields(window, cx);
        cx.notify();
    }

    pub fn save(&mut self, cx: &mut Context<Self>) {
        if let Err(e) = self.store.save() {
            warn!("Draft not saved: {}", e);
        }
        dump_notes(&self.store);
        cx.notify();
    }

    pub fn cancel(&mut self, cx: &mut Context<Self>) {
        self.store.cancel();
        cx.notify();
    }

    pub fn delete(&mut self, id: NoteId, cx: &mut Context<Self>) {
        self.store.delete(id);
        self.expanded.remove(&id);
        dump_notes(&self.store);
        cx.notify();
    }

    pub fn toggle_theme(&mut self, cx: &mut Context<Self>) {
        self.theme.toggle();
        debug!("Switched to {:?} theme", self.theme);
        cx.notify();
    }

    fn toggle_expanded(&mut self, id: NoteId, cx: &mut Context<Self>) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
        cx.notify();
    }

    fn load_draft_into_fields(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let draft = self.store.draft().clone();
        self.title_field.update(cx, |field, cx| {
            field.set_content(draft.title, cx);
        });
        self.content_field.update(cx, |field, cx| {
            field.set_content(draft.content, cx);
        });
        self.title_field.read(cx).focus(window);
    }
}

impl Focusable for NoteApp {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for NoteApp {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let palette = Palette::for_theme(self.theme);

        let body = if self.store.is_editing() {
            self.render_input(&palette, cx).into_any_element()
        } else {
            self.render_notes(&palette, cx).into_any_element()
        };

        div()
            .flex()
            .flex_col()
            .size_full()
            .bg(palette.background)
            .text_color(palette.text)
            .track_focus(&self.focus_handle)
            .child(self.render_header(&palette, cx))
            .child(body)
    }
}

impl NoteApp {
    fn render_header(&self, palette: &Palette, cx: &mut Context<Self>) -> Div {
        let toggle_label = if self.theme.is_dark() { "☀" } else { "☾" };

        div()
            .flex()
            .justify_between()
            .items_center()
            .px_4()
            .py_3()
            .bg(palette.surface)
            .border_b_1()
            .border_color(palette.border)
            .child(
                div()
                    .text_xl()
                    .font_weight(FontWeight::BOLD)
                    .child(self.config.labels.app_title.clone()),
            )
            .child(
                div()
                    .size(px(28.0))
                    .flex()
                    .justify_center()
                    .items_center()
                    .rounded_full()
                    .cursor_pointer()
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(|view, _: &MouseDownEvent, _window, cx| {
                            view.toggle_theme(cx);
                        }),
                    )
                    .child(toggle_label),
            )
    }

    fn render_notes(&self, palette: &Palette, cx: &mut Context<Self>) -> Div {
        let groups = NoteGroups::for_clock(self.store.all_notes(), self.store.clock());
        let footer = self.config.labels.note_count(groups.total);

        let sections = groups
            .buckets
            .iter()
            .map(|bucket| self.render_bucket(bucket, palette, cx))
            .collect::<Vec<_>>();

        div()
            .flex()
            .flex_col()
            .flex_grow()
            .p_4()
            .child(
                div()
                    .id("note-list")
                    .flex()
                    .flex_col()
                    .flex_grow()
                    .overflow_y_scroll()
                    .children(sections),
            )
            .child(
                div()
                    .flex()
                    .justify_between()
                    .items_center()
                    .pt_4()
                    .child(div().text_color(palette.muted_text).child(footer))
                    .child(
                        div()
                            .size(px(40.0))
                            .flex()
                            .justify_center()
                            .items_center()
                            .bg(palette.primary)
                            .text_color(palette.on_primary)
                            .text_lg()
                            .font_weight(FontWeight::BOLD)
                            .rounded_full()
                            .cursor_pointer()
                            .on_mouse_down(
                                MouseButton::Left,
                                cx.listener(|view, _: &MouseDownEvent, window, cx| {
                                    view.start_create(window, cx);
                                }),
                            )
                            .child("+"),
                    ),
            )
    }

    fn render_bucket(
        &self,
        bucket: &Bucket<'_>,
        palette: &Palette,
        cx: &mut Context<Self>,
    ) -> Div {
        let heading = bucket
            .label
            .render(&self.config.labels, &self.config.date_format);

        div()
            .flex()
            .flex_col()
            .gap_2()
            .pb_4()
            .child(
                div()
                    .text_lg()
                    .font_weight(FontWeight::BOLD)
                    .child(heading),
            )
            .children(
                bucket
                    .notes
                    .iter()
                    .map(|note| self.render_card(note, palette, cx))
                    .collect::<Vec<_>>(),
            )
    }

    fn render_card(&self, note: &Note, palette: &Palette, cx: &mut Context<Self>) -> Div {
        let note_id = note.id;
        let content = if self.expanded.contains(&note_id) {
            note.content.clone()
        } else {
            note.preview(self.config.preview_graphemes)
        };
        let date = format_date(note.date, &self.config.date_format);

        div()
            .flex()
            .flex_col()
            .gap_1()
            .p_4()
            .rounded_lg()
            .bg(palette.card)
            .child(
                div()
                    .font_weight(FontWeight::BOLD)
                    .child(note.title.clone()),
            )
            .child(
                div()
                    .cursor_pointer()
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(move |view, _: &MouseDownEvent, _window, cx| {
                            view.toggle_expanded(note_id, cx);
                        }),
                    )
                    .child(content),
            )
            .child(
                div()
                    .flex()
                    .justify_between()
                    .items_center()
                    .child(div().text_color(palette.muted_text).child(date))
                    .child(
                        div()
                            .flex()
                            .gap_2()
                            .child(
                                card_button(self.config.labels.edit.clone(), palette)
                                    .bg(palette.edit_button)
                                    .on_mouse_down(
                                        MouseButton::Left,
                                        cx.listener(move |view, _: &MouseDownEvent, window, cx| {
                                            view.start_edit(note_id, window, cx);
                                        }),
                                    ),
                            )
                            .child(
                                card_button(self.config.labels.delete.clone(), palette)
                                    .bg(palette.delete_button)
                                    .on_mouse_down(
                                        MouseButton::Left,
                                        cx.listener(move |view, _: &MouseDownEvent, _window, cx| {
                                            view.delete(note_id, cx);
                                        }),
                                    ),
                            ),
                    ),
            )
    }

    fn render_input(&self, palette: &Palette, cx: &mut Context<Self>) -> Div {
        div()
            .flex()
            .flex_col()
            .flex_grow()
            .gap_2()
            .p_4()
            .child(
                div()
                    .p_2()
                    .rounded_md()
                    .border_1()
                    .border_color(palette.border)
                    .font_weight(FontWeight::BOLD)
                    .child(self.title_field.clone()),
            )
            .child(
                div()
                    .flex_grow()
                    .p_2()
                    .rounded_md()
                    .border_1()
                    .border_color(palette.border)
                    .child(self.content_field.clone()),
            )
            .child(
                div()
                    .flex()
                    .justify_end()
                    .gap_2()
                    .child(
                        card_button(self.config.labels.cancel.clone(), palette)
                            .bg(palette.primary)
                            .on_mouse_down(
                                MouseButton::Left,
                                cx.listener(|view, _: &MouseDownEvent, _window, cx| {
                                    view.cancel(cx);
                                }),
                            ),
                    )
                    .child(
                        card_button(self.config.labels.save.clone(), palette)
                            .bg(palette.primary)
                            .on_mouse_down(
                                MouseButton::Left,
                                cx.listener(|view, _: &MouseDownEvent, _window, cx| {
                                    view.save(cx);
                                }),
                            ),
                    ),
            )
    }
}

fn card_button(label: String, palette: &Palette) -> Div {
    div()
        .px_3()
        .py_1()
        .rounded_md()
        .cursor_pointer()
        .text_color(palette.on_primary)
        .child(label)
}
