/// What the page should look like for a given menu state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavState {
    pub menu_open: bool,
    pub backdrop_visible: bool,
    pub scroll_locked: bool,
}

impl NavState {
    pub fn aria_expanded(&self) -> &'static str {
        if self.menu_open {
            "true"
        } else {
            "false"
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> NavState {
        NavState {
            menu_open: self.open,
            backdrop_visible: self.open,
            scroll_locked: self.open,
        }
    }

    pub fn toggle(&mut self) -> NavState {
        self.open = !self.open;
        self.state()
    }

    pub fn open(&mut self) -> NavState {
        self.open = true;
        self.state()
    }

    /// Backdrop click, link click and Escape all land here.
    pub fn close(&mut self) -> NavState {
        self.open = false;
        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let menu = NavMenu::default();
        let state = menu.state();
        assert!(!state.menu_open);
        assert!(!state.scroll_locked);
        assert_eq!(state.aria_expanded(), "false");
    }

    #[test]
    fn toggle_syncs_backdrop_aria_and_scroll() {
        let mut menu = NavMenu::default();
        let opened = menu.toggle();
        assert_eq!(
            opened,
            NavState {
                menu_open: true,
                backdrop_visible: true,
                scroll_locked: true
            }
        );
        assert_eq!(opened.aria_expanded(), "true");

        let closed = menu.toggle();
        assert!(!closed.menu_open && !closed.backdrop_visible && !closed.scroll_locked);
    }

    #[test]
    fn close_is_idempotent() {
        let mut menu = NavMenu::default();
        menu.open();
        assert!(!menu.close().menu_open);
        assert!(!menu.close().menu_open);
        assert!(!menu.is_open());
    }
}
