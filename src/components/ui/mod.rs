pub mod button;

pub use button::{Button, ButtonSize, ButtonVariant, LinkButton};
