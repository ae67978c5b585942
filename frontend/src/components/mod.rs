pub mod contact_form;
pub mod footer;
pub mod language_toggle;
pub mod nav_bar;
pub mod notification;
pub mod reveal;
pub mod translate;
