//! Contact Us details mapper.

use serde_json::Value;

use crate::content::model::ContactDetails;
use crate::content::probe::{self, Precedence};

const PRECEDENCE: Precedence = Precedence::AttributesFirst;

/// Maps the `ContactDetails` component of the `contact-us` single type.
/// Returns `None` without an address.
#[must_use]
pub fn map_contact_details(raw: &Value) -> Option<ContactDetails> {
    let entity = probe::single(raw)?;
    let component = probe::field_any(
        entity,
        &["ContactDetails", "Contact", "contactDetails"],
        PRECEDENCE,
    )?;
    let p = Precedence::FlatFirst;
    Some(ContactDetails {
        heading: probe::text(component, &["Heading", "Title", "heading"], p)
            .unwrap_or_else(|| "Get in touch".to_string()),
        address: probe::text(component, &["Address", "address"], p)?,
        phone: probe::text(component, &["Phone", "Telephone", "phone"], p),
        email: probe::text(component, &["Email", "email"], p),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_details() {
        let raw = json!({"data": {"attributes": {"ContactDetails": {
            "Heading": "Corporate Office",
            "Address": "Kalpataru Inspire, Santacruz (East), Mumbai 400 055",
            "Phone": "+91 22 6640 2323"
        }}}});
        let d = map_contact_details(&raw).unwrap();
        assert_eq!(d.heading, "Corporate Office");
        assert_eq!(d.phone.as_deref(), Some("+91 22 6640 2323"));
        assert_eq!(d.email, None);
    }

    #[test]
    fn missing_address_is_none() {
        let raw = json!({"data": {"ContactDetails": {"Heading": "Corporate Office"}}});
        assert!(map_contact_details(&raw).is_none());
    }
}
