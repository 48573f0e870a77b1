use console::Style;
use once_cell::sync::Lazy;

pub static NUMBER: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static NAME: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static DIM: Lazy<Style> = Lazy::new(|| Style::new().color256(246));
pub static HEADING: Lazy<Style> = Lazy::new(|| Style::new().bold().underlined());
pub static COMPLETE: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static BADGE: Lazy<Style> = Lazy::new(|| Style::new().magenta().bold());

pub static INFO: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red());
