use std::rc::Rc;

use site_behaviors::{App, LocationNavigationKind, Page, SiteConfig};

const SITE_HTML: &str = include_str!("fixtures/index.html");

fn contact_page(config: SiteConfig) -> site_behaviors::Result<Page> {
    let mut page = Page::from_html_with_url("https://muster-handwerk.test/", SITE_HTML)?;
    App::new(config).init(&mut page)?;
    Ok(page)
}

fn fill_valid(page: &mut Page) -> site_behaviors::Result<()> {
    page.type_text("#name", "Erika Mustermann")?;
    page.type_text("#email", "erika@example.de")?;
    page.type_text("#phone", "+49 (30) 123-4567")?;
    page.type_text("#message", "Bitte um ein Angebot für die Küche.")?;
    page.set_checked("#consent", true)?;
    Ok(())
}

#[test]
fn invalid_submission_shows_every_error_and_one_toast() -> site_behaviors::Result<()> {
    let mut page = contact_page(SiteConfig::default())?;
    page.type_text("#email", "erika@example")?;
    page.type_text("#phone", "12345")?;
    page.type_text("#message", "Kurz")?;
    page.submit("#contact")?;

    for group in [
        "#group-name",
        "#group-email",
        "#group-phone",
        "#group-message",
        "#group-consent",
    ] {
        page.assert_class(group, "has-error", true)?;
    }
    page.assert_text("#group-name .c-form__error", "Dieses Feld ist erforderlich.")?;
    page.assert_text(
        "#group-phone .c-form__error",
        "Bitte geben Sie eine gültige Telefonnummer ein.",
    )?;
    page.assert_text(
        "#group-message .c-form__error",
        "Bitte geben Sie mindestens 10 Zeichen ein.",
    )?;
    page.assert_text(
        "#group-consent .c-form__error",
        "Bitte akzeptieren Sie die Bedingungen.",
    )?;
    page.assert_attr("#consent", "aria-invalid", Some("true"))?;

    assert_eq!(page.count("#toast-container .c-toast")?, 1);
    page.assert_attr(".c-toast", "role", Some("alert"))?;
    assert!(!page.is_disabled("#send")?);
    page.assert_text("#send", "Absenden")?;

    page.flush()?;
    assert!(page.take_location_navigations().is_empty());
    assert_eq!(page.count(".c-toast")?, 0);
    Ok(())
}

#[test]
fn corrected_fields_clear_their_errors_while_typing() -> site_behaviors::Result<()> {
    let mut page = contact_page(SiteConfig::default())?;
    page.submit("#contact")?;
    page.assert_class("#group-email", "has-error", true)?;

    page.type_text("#email", "erika@")?;
    page.assert_text(
        "#group-email .c-form__error",
        "Bitte geben Sie eine gültige E-Mail-Adresse ein.",
    )?;
    page.type_text("#email", "erika@example.de")?;
    page.assert_class("#group-email", "has-error", false)?;
    page.assert_text("#group-email .c-form__error", "")?;
    assert_eq!(page.style("#group-email .c-form__error", "display")?, "none");
    page.assert_attr("#email", "aria-invalid", None)?;
    Ok(())
}

#[test]
fn valid_submission_locks_the_button_and_redirects() -> site_behaviors::Result<()> {
    let mut page = contact_page(SiteConfig::default())?;
    fill_valid(&mut page)?;
    page.click("#send")?;

    assert!(page.is_disabled("#send")?);
    page.assert_text("#send", "Wird gesendet...")?;
    assert_eq!(page.style("#send > span", "animation")?, "spin 0.6s linear infinite");
    page.assert_text(
        "#c-spinner-keyframes",
        "@keyframes spin { to { transform: rotate(360deg); } }",
    )?;
    assert_eq!(page.count(".c-toast")?, 0);
    assert_eq!(page.count(".has-error")?, 0);

    page.click("#send")?;
    page.advance_time(1_500)?;
    let navigations = page.take_location_navigations();
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0].kind, LocationNavigationKind::HrefSet);
    assert_eq!(navigations[0].to, "https://muster-handwerk.test/thank_you.html");
    assert_eq!(page.location_pathname(), "/thank_you.html");
    Ok(())
}

#[test]
fn resubmitting_adds_the_keyframes_only_once() -> site_behaviors::Result<()> {
    let mut page = contact_page(SiteConfig::default())?;
    fill_valid(&mut page)?;
    page.submit("#contact")?;
    page.submit("#contact")?;
    assert_eq!(page.count("#c-spinner-keyframes")?, 1);
    Ok(())
}

#[test]
fn messages_and_redirect_come_from_configuration() -> site_behaviors::Result<()> {
    let config = SiteConfig::from_json(
        r#"{
            "forms": {
                "redirect_to": "/danke.html",
                "submit_delay_ms": 200,
                "messages": { "required": "Pflichtfeld", "form_invalid": "Formular prüfen" }
            }
        }"#,
    )?;
    let mut page = contact_page(config)?;
    page.submit("#contact")?;
    page.assert_text("#group-name .c-form__error", "Pflichtfeld")?;
    page.assert_text(".c-toast", "Formular prüfen")?;

    fill_valid(&mut page)?;
    page.submit("#contact")?;
    page.advance_time(200)?;
    assert_eq!(page.location_pathname(), "/danke.html");
    Ok(())
}
