//! Contact Us.

use crate::cms::{CmsRequest, StrapiQuery, endpoints};
use crate::contact::ContactFormState;
use crate::content::mappers::{map_contact_details, map_top_banner_data};

use super::{Page, PageBuilder, PageContext, Route, Section};

/// `/contact-us`: banner, enquiry form and contact details. `form` carries
/// the values and outcome of a submission, if there was one.
pub async fn contact_us(ctx: &PageContext, form: Option<ContactFormState>) -> Page {
    let raw = ctx
        .fetch(CmsRequest::new(endpoints::CONTACT_US).with_query(StrapiQuery::new().populate_all()))
        .await;

    let mut page = PageBuilder::new(ctx, Route::ContactUs);
    page.banner(raw.as_ref().and_then(map_top_banner_data));
    page.push(Section::ContactForm(form.unwrap_or_default()));
    let details = page.or_fallback("contact", raw.as_ref().and_then(map_contact_details), |c| {
        c.contact.clone()
    });
    page.push(Section::ContactDetails(details));
    page.finish()
}
