pub mod applications;
pub mod banks;
pub mod login;
pub mod merchants;
pub mod outlets;
pub mod public;
pub mod register;

pub use applications::{applications_page, ApplicationsVm};
pub use banks::{banks_page, BanksVm};
pub use login::login_page;
pub use merchants::{merchants_page, MerchantsVm};
pub use outlets::outlets_page;
pub use public::{
    apply_failed_page, merchant_not_found_page, offers_unavailable_page, public_offers_page,
};
pub use register::{register_done_page, register_page};

/// `?k=v&...` with proper escaping; empty values are dropped.
pub(crate) fn query_string(pairs: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs.iter().filter(|(_, value)| !value.is_empty()) {
        serializer.append_pair(key, value);
    }
    let query = serializer.finish();
    if query.is_empty() {
        query
    } else {
        format!("?{query}")
    }
}
