use tower_cookies::{Cookie, Cookies};
use tower_cookies::cookie::SameSite;

const FLASH_COOKIE: &str = "flash";

/// One-shot notice carried across a redirect. Only a key is stored client side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    BookingRequested,
}

impl Flash {
    fn key(self) -> &'static str {
        match self {
            Flash::BookingRequested => "booking_requested",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "booking_requested" => Some(Flash::BookingRequested),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::BookingRequested => "Thank you! Your booking request has been received and is awaiting confirmation.",
        }
    }
}

pub fn set(cookies: &Cookies, flash: Flash) {
    let mut cookie = Cookie::new(FLASH_COOKIE, flash.key());
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookies.add(cookie);
}

/// Reads and clears the pending flash, if any.
pub fn take(cookies: &Cookies) -> Option<Flash> {
    let value = cookies.get(FLASH_COOKIE)?.value().to_string();
    cookies.remove(Cookie::build((FLASH_COOKIE, "")).path("/").into());
    Flash::from_key(&value)
}
