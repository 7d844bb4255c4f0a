//! Server-rendered catalog UI
//!
//! Handlers load the descriptor through a [`DescriptorSource`], build explicit
//! state ([`CatalogState`](crate::catalog::CatalogState), [`TryItPanel`]) and
//! hand it to the pure functions in [`render`].

pub mod execute;
pub mod handlers;
pub mod render;
pub mod source;
pub mod theme;
pub mod widgets;

pub use execute::{HttpInvoker, Invoker, Outcome, Phase, PreparedRequest, TryItPanel};
pub use source::{DescriptorSource, FileSource, HttpSource};
pub use theme::ThemePreference;
pub use widgets::{CounterAnimation, Toast, ToastKind, ToastQueue};
