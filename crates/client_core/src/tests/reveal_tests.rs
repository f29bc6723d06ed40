use super::*;

#[test]
fn starts_hidden_when_observation_is_available() {
    let reveal = RevealController::new("history", RevealOptions::default(), ObservationSupport::Available);
    assert!(!reveal.has_entered_viewport());
    assert_eq!(reveal.variant(), RevealVariant::Hidden);
}

#[test]
fn fails_open_without_observation() {
    let mut reveal =
        RevealController::new("contact", RevealOptions::default(), ObservationSupport::Unavailable);
    assert!(reveal.has_entered_viewport());
    assert_eq!(reveal.variant(), RevealVariant::Visible);
    assert!(!reveal.observe(0.0));
    assert!(reveal.has_entered_viewport());
}

#[test]
fn flips_exactly_once_and_never_reverts() {
    let mut reveal = RevealController::new("predict", RevealOptions::default(), ObservationSupport::Available);

    assert!(!reveal.observe(0.0));
    assert!(reveal.observe(0.05));
    assert!(reveal.has_entered_viewport());

    // Scrolling away and back again changes nothing.
    assert!(!reveal.observe(0.0));
    assert!(!reveal.observe(1.0));
    assert!(reveal.has_entered_viewport());
    assert_eq!(reveal.state(), RevealState { has_entered_viewport: true });
}

#[test]
fn honours_visibility_threshold() {
    let mut reveal =
        RevealController::new("home", RevealOptions::with_threshold(0.2), ObservationSupport::Available);

    assert!(!reveal.observe(0.1));
    assert!(!reveal.has_entered_viewport());
    assert!(reveal.observe(0.2));
}

#[test]
fn sections_are_independent() {
    let mut home = RevealController::new("home", RevealOptions::default(), ObservationSupport::Available);
    let about = RevealController::new("about", RevealOptions::default(), ObservationSupport::Available);

    home.observe(1.0);

    assert!(home.has_entered_viewport());
    assert!(!about.has_entered_viewport());
    assert_eq!(about.section(), "about");
}

#[test]
fn computes_vertical_visible_fraction() {
    assert_eq!(vertical_visible_fraction(0.0, 100.0, 0.0, 800.0), 1.0);
    assert_eq!(vertical_visible_fraction(750.0, 850.0, 0.0, 800.0), 0.5);
    assert_eq!(vertical_visible_fraction(900.0, 1000.0, 0.0, 800.0), 0.0);
    assert_eq!(vertical_visible_fraction(-200.0, -100.0, 0.0, 800.0), 0.0);
    assert_eq!(vertical_visible_fraction(10.0, 10.0, 0.0, 800.0), 1.0);
}
