use crossterm::style::{style, Color, StyledContent, Stylize};
use std::fmt::Display;

pub(crate) const ACCENT: Color = Color::Rgb {
    r: 137,
    g: 180,
    b: 250,
};
pub(crate) const GREEN: Color = Color::Rgb {
    r: 166,
    g: 227,
    b: 161,
};
pub(crate) const RED: Color = Color::Rgb {
    r: 243,
    g: 139,
    b: 168,
};
pub(crate) const YELLOW: Color = Color::Rgb {
    r: 249,
    g: 226,
    b: 175,
};
pub(crate) const MAUVE: Color = Color::Rgb {
    r: 203,
    g: 166,
    b: 247,
};

pub(crate) fn heading<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(ACCENT).bold()
}

pub(crate) fn success<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(GREEN)
}

pub(crate) fn error<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(RED)
}

pub(crate) fn notice<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(YELLOW)
}

pub(crate) fn calendar<D: Display>(text: D) -> StyledContent<D> {
    style(text).with(MAUVE)
}
