//! Page behaviour as plain state machines. Nothing in here touches the DOM.

pub mod contact;
pub mod navigation;
pub mod notification;
pub mod reveal;
