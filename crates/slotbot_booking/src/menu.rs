// --- File: crates/slotbot_booking/src/menu.rs ---
use crate::action::Action;
use crate::messages;
use crate::screen::Screen;

#[derive(Debug, Clone)]
pub struct MenuController {
    info_text: String,
}

impl MenuController {
    pub fn new(info_text: impl Into<String>) -> Self {
        Self {
            info_text: info_text.into(),
        }
    }

    pub fn main_menu(&self) -> Screen {
        Self::menu_with(messages::WELCOME)
    }

    pub fn info(&self) -> Screen {
        Screen::new(self.info_text.clone()).button(messages::BACK, Action::Start)
    }

    pub fn unknown_action(&self) -> Screen {
        Self::menu_with(messages::UNKNOWN_ACTION)
    }

    fn menu_with(text: &str) -> Screen {
        Screen::new(text)
            .button(messages::BOOK, Action::Browse)
            .button(messages::MY_BOOKINGS, Action::MyBookings)
            .button(messages::CANCEL_BOOKING, Action::MyBookings)
            .button(messages::ABOUT, Action::Info)
    }
}
