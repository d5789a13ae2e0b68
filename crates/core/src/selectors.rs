//! The target site's page structure, collected in one place.
//!
//! Everything here is an external contract owned by myfitness.lv; a site
//! redesign breaks these constants before anything else in the crate.

pub const COOKIE_ALLOW_ALL: &str = "//button[@id='CybotCookiebotDialogBodyLevelButtonLevelOptinAllowAll']";
pub const PROMO_CLOSE: &str = "//a[@class='c-dialog__close']";

pub const LOGIN_LINK: &str = "//a[@class='link link-login']";
pub const LOGIN_USERNAME: &str = "//input[@id='login-field-username']";
pub const LOGIN_PASSWORD: &str = "//input[@id='login-field-password']";
/// Submit control, matched through its Latvian "Ieiet" label.
pub const LOGIN_SUBMIT: &str = "//button[@type='submit']/span[contains(text(), 'Ieiet')]";

pub const TIMETABLE: &str = "//table[@class='timetable-table']";
pub const TIMETABLE_WRAP: &str = "//div[contains(@class, 'timetable-table-wrap')]";
/// The visible week marker; the page keeps hidden duplicates around.
pub const WEEK_MARKER: &str = "//span[@data-week and not(contains(@class, 'hidden'))]";
pub const WEEK_ATTR: &str = "data-week";
pub const NEXT_WEEK: &str = "//div[@class='week-nav-item next-week']";
pub const LOADER: &str = "//div[@class='loader notice success']";

/// Slots open for registration, skipping hidden ones.
pub const OPEN_CLASS_ITEMS: &str = "//table[@class='timetable-table']//div[contains(@class, 'training-class-item bron-open') and not(contains(@class, 'hidden'))]";
pub const CLASS_BOOKING_LINK: &str = ".//a[contains(@class, 'link-bron-training')]";
pub const CLASS_TITLE: &str = ".//span[@class='title']";

pub const CONFIRM_MODAL: &str = "//div[@class='m-modal comment-modal' and @style='display: block;']";
