use gpui::{Rgba, rgb};

use crate::models::Theme;

pub struct Palette {
    pub background: Rgba,
    pub surface: Rgba,
    pub card: Rgba,
    pub border: Rgba,
    pub primary: Rgba,
    pub on_primary: Rgba,
    pub text: Rgba,
    pub muted_text: Rgba,
    pub edit_button: Rgba,
    pub delete_button: Rgba,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: rgb(0xffffff),
                surface: rgb(0xfafafa),
                card: rgb(0xe7e0ec),
                border: rgb(0xe0e0e0),
                primary: rgb(0x0c1a72),
                on_primary: rgb(0xffffff),
                text: rgb(0x000000),
                muted_text: rgb(0x5f5f5f),
                edit_button: rgb(0x4caf50),
                delete_button: rgb(0xff0000),
            },
            Theme::Dark => Self {
                background: rgb(0x121212),
                surface: rgb(0x1f1f1f),
                card: rgb(0x1f1f1f),
                border: rgb(0x2c2c2c),
                primary: rgb(0x4caf50),
                on_primary: rgb(0xffffff),
                text: rgb(0xffffff),
                muted_text: rgb(0xb0b0b0),
                edit_button: rgb(0x0000ff),
                delete_button: rgb(0xff5722),
            },
        }
    }
}
