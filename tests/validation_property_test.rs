use std::rc::Rc;

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};
use site_behaviors::{App, FieldError, FieldRules, FieldState, Page, SiteConfig};

const VALIDATION_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/validation_property_test.txt";
const DEFAULT_VALIDATION_PROPTEST_CASES: u32 = 256;

const CONTACT_FORM_HTML: &str = r#"
<body>
  <form class="c-form" id="contact">
    <div class="c-form__group" id="group-email">
      <input id="email" type="email" required>
      <span class="c-form__error"></span>
    </div>
    <div class="c-form__group" id="group-message">
      <textarea id="message" required></textarea>
      <span class="c-form__error"></span>
    </div>
    <button type="submit" id="send">Senden</button>
  </form>
</body>
"#;

fn validation_proptest_cases() -> u32 {
    std::env::var("SITE_BEHAVIORS_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_VALIDATION_PROPTEST_CASES)
}

fn rules() -> Result<FieldRules, TestCaseError> {
    FieldRules::new().map_err(|err| TestCaseError::fail(format!("{err:?}")))
}

fn check(rules: &FieldRules, field: &FieldState) -> Result<Option<FieldError>, TestCaseError> {
    rules
        .check(field)
        .map_err(|err| TestCaseError::fail(format!("{err:?}")))
}

fn whitespace_strategy() -> BoxedStrategy<String> {
    vec(
        prop_oneof![
            Just(' '),
            Just('\t'),
            Just('\n'),
            Just('\u{A0}'),
            Just('\u{3000}'),
            Just('\u{FEFF}'),
        ],
        0..=6,
    )
    .prop_map(|chars| chars.into_iter().collect())
    .boxed()
}

fn local_part_strategy() -> BoxedStrategy<String> {
    "[a-z0-9._+-]{1,12}".boxed()
}

fn phone_char_strategy() -> BoxedStrategy<char> {
    prop_oneof![
        8 => (b'0'..=b'9').prop_map(char::from),
        1 => Just(' '),
        1 => Just('-'),
        1 => Just('+'),
        1 => Just('('),
        1 => Just(')'),
    ]
    .boxed()
}

fn non_ascii_digit_strategy() -> BoxedStrategy<char> {
    prop_oneof![
        proptest::char::range('\u{0660}', '\u{0669}'),
        proptest::char::range('\u{06F0}', '\u{06F9}'),
        proptest::char::range('\u{0966}', '\u{096F}'),
        proptest::char::range('\u{FF10}', '\u{FF19}'),
    ]
    .boxed()
}

#[derive(Clone, Debug)]
enum FormAction {
    TypeEmail(String),
    TypeMessage(String),
    BlurEmail,
    Submit,
    Advance(i64),
}

fn form_action_strategy() -> BoxedStrategy<FormAction> {
    prop_oneof![
        3 => prop_oneof![Just(String::new()), Just("a@b.co".to_string()), "[a-z@.]{0,8}"]
            .prop_map(FormAction::TypeEmail),
        3 => "[a-z ]{0,14}".prop_map(FormAction::TypeMessage),
        1 => Just(FormAction::BlurEmail),
        2 => Just(FormAction::Submit),
        1 => (0i64..=6_000).prop_map(FormAction::Advance),
    ]
    .boxed()
}

fn run_action(page: &mut Page, action: &FormAction) -> site_behaviors::Result<()> {
    match action {
        FormAction::TypeEmail(value) => page.type_text("#email", value),
        FormAction::TypeMessage(value) => page.type_text("#message", value),
        FormAction::BlurEmail => page.blur("#email"),
        FormAction::Submit => page.submit("#contact"),
        FormAction::Advance(ms) => page.advance_time(*ms),
    }
}

fn assert_form_state_is_consistent(actions: &[FormAction]) -> TestCaseResult {
    let mut page = Page::from_html_with_url("https://example.test/", CONTACT_FORM_HTML)
        .map_err(|err| TestCaseError::fail(format!("{err:?}")))?;
    Rc::new(App::new(SiteConfig::default()))
        .boot(&mut page)
        .map_err(|err| TestCaseError::fail(format!("{err:?}")))?;

    for (step, action) in actions.iter().enumerate() {
        let outcome = run_action(&mut page, action);
        prop_assert!(
            outcome.is_ok(),
            "action failed at step {step}: {action:?}, error={outcome:?}, actions={actions:?}"
        );

        for group in ["#group-email", "#group-message"] {
            let has_error = page
                .has_class(group, "has-error")
                .map_err(|err| TestCaseError::fail(format!("{err:?}")))?;
            let message = page
                .text(&format!("{group} .c-form__error"))
                .map_err(|err| TestCaseError::fail(format!("{err:?}")))?;
            prop_assert_eq!(
                has_error,
                !message.is_empty(),
                "error marker and text disagree for {} after step {}: {:?}",
                group,
                step,
                action
            );
        }
        let toasts = page
            .count(".c-toast")
            .map_err(|err| TestCaseError::fail(format!("{err:?}")))?;
        let submits = actions[..=step]
            .iter()
            .filter(|action| matches!(action, FormAction::Submit))
            .count();
        prop_assert!(toasts <= submits, "{toasts} toasts after {submits} submits");
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: validation_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(VALIDATION_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn required_blank_values_always_fail_first(
        blank in whitespace_strategy(),
        input_type in prop_oneof![Just("text"), Just("email"), Just("tel")],
    ) {
        let rules = rules()?;
        let field = FieldState::input(input_type, &blank).required();
        prop_assert_eq!(check(&rules, &field)?, Some(FieldError::Required));
        let message = FieldState::textarea(&blank).required();
        prop_assert_eq!(check(&rules, &message)?, Some(FieldError::Required));
    }

    #[test]
    fn well_formed_emails_pass(
        local in local_part_strategy(),
        domain in "[a-z0-9-]{1,10}",
        tld in "[a-z]{2,6}",
    ) {
        let rules = rules()?;
        let value = format!("{local}@{domain}.{tld}");
        prop_assert_eq!(check(&rules, &FieldState::input("email", &value).required())?, None);
    }

    #[test]
    fn emails_without_an_at_sign_fail(value in "[a-z0-9.]{1,20}") {
        let rules = rules()?;
        prop_assert_eq!(
            check(&rules, &FieldState::input("email", &value))?,
            Some(FieldError::InvalidEmail)
        );
    }

    #[test]
    fn phone_length_window_is_enforced(chars in vec(phone_char_strategy(), 1..=30)) {
        let rules = rules()?;
        let value: String = chars.into_iter().collect();
        let len = value.chars().count();
        let expected = if (10..=20).contains(&len) { None } else { Some(FieldError::InvalidPhone) };
        prop_assert_eq!(check(&rules, &FieldState::input("tel", &value))?, expected);
    }

    #[test]
    fn phones_with_letters_fail(prefix in "[0-9]{5,10}", letter in "[a-zA-Z]", suffix in "[0-9]{5,9}") {
        let rules = rules()?;
        let value = format!("{prefix}{letter}{suffix}");
        prop_assert_eq!(
            check(&rules, &FieldState::input("tel", &value))?,
            Some(FieldError::InvalidPhone)
        );
    }

    #[test]
    fn phones_with_non_ascii_digits_fail(
        prefix in "[0-9]{0,8}",
        digit in non_ascii_digit_strategy(),
        suffix in "[0-9]{1,8}",
    ) {
        let rules = rules()?;
        let value = format!("{prefix}{digit}{suffix}12");
        prop_assert_eq!(
            check(&rules, &FieldState::input("tel", &value))?,
            Some(FieldError::InvalidPhone)
        );
    }

    #[test]
    fn required_messages_need_ten_trimmed_characters(
        body in "[a-zäöü]{1,20}",
        pad in whitespace_strategy(),
    ) {
        let rules = rules()?;
        let value = format!("{pad}{body}{pad}");
        let expected = if body.chars().count() < 10 { Some(FieldError::TooShort) } else { None };
        prop_assert_eq!(check(&rules, &FieldState::textarea(&value).required())?, expected);
    }

    #[test]
    fn form_actions_keep_error_markers_consistent(
        actions in vec(form_action_strategy(), 1..=20),
    ) {
        assert_form_state_is_consistent(&actions)?;
    }
}
