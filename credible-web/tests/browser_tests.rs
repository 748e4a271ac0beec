#![cfg(target_arch = "wasm32")]

use credible_fx::{CounterAnimation, CounterEnd, FxConfig, Hover};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlElement};

use credible_web::{anchors, counter, decor, dom, page, theme, viewport};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(html: &str) -> web_sys::Element {
    let doc = dom::document().expect("document");
    let root = match doc.get_element_by_id("fixture") {
        Some(root) => root,
        None => {
            let root = doc.create_element("div").expect("create fixture");
            root.set_id("fixture");
            let body = doc.body().expect("document body");
            body.insert_before(&root, body.first_child().as_ref())
                .expect("insert fixture");
            root
        }
    };
    root.set_inner_html(html);
    root
}

fn html_el(selector: &str) -> HtmlElement {
    dom::document()
        .expect("document")
        .query_selector(selector)
        .expect("valid selector")
        .expect("element present")
        .dyn_into()
        .expect("html element")
}

fn root_theme() -> Option<String> {
    dom::document()
        .and_then(|doc| doc.document_element())
        .and_then(|root| root.get_attribute("data-theme"))
}

fn reset() {
    install(FxConfig::default());
}

fn install(config: FxConfig) {
    page::install(config);
    dom::local_storage().expect("localStorage").clear().expect("clear");
}

fn inline_style(selector: &str, property: &str) -> String {
    html_el(selector)
        .style()
        .get_property_value(property)
        .unwrap_or_default()
}

#[wasm_bindgen_test]
fn theme_defaults_to_light_and_toggle_persists() {
    reset();
    fixture(r#"<button id="themeToggle">theme</button>"#);
    let doc = dom::document().expect("document");
    theme::attach(&doc);
    assert_eq!(root_theme().as_deref(), Some("light"));

    html_el("#themeToggle")
        .dispatch_event(&Event::new("click").expect("click event"))
        .expect("dispatch click");
    assert_eq!(root_theme().as_deref(), Some("dark"));
    let stored = dom::local_storage()
        .expect("localStorage")
        .get_item("theme")
        .expect("read theme");
    assert_eq!(stored.as_deref(), Some("dark"));
    assert_eq!(
        html_el("#themeToggle").style().get_property_value("transform").ok().as_deref(),
        Some("rotate(360deg)")
    );

    theme::toggle_theme(&html_el("#themeToggle"));
    assert_eq!(root_theme().as_deref(), Some("light"));
    assert_eq!(page::snapshot().stored_theme.as_deref(), Some("light"));
}

#[wasm_bindgen_test]
fn stored_dark_theme_is_applied_on_attach() {
    reset();
    dom::local_storage()
        .expect("localStorage")
        .set_item("theme", "dark")
        .expect("seed theme");
    fixture("");
    theme::attach(&dom::document().expect("document"));
    assert_eq!(root_theme().as_deref(), Some("dark"));
    assert_eq!(page::snapshot().theme.as_deref(), Some("dark"));
}

#[wasm_bindgen_test]
fn nav_highlights_only_the_current_path() {
    reset();
    let path = dom::window()
        .and_then(|win| win.location().pathname().ok())
        .expect("pathname");
    fixture(&format!(
        r#"<a class="nav-link" id="here" href="{path}">here</a><a class="nav-link" id="away" href="/elsewhere">away</a>"#
    ));
    theme::highlight_nav(&dom::document().expect("document"));
    assert_eq!(
        html_el("#here").style().get_property_value("color").ok().as_deref(),
        Some("var(--accent-primary)")
    );
    assert_eq!(
        html_el("#away").style().get_property_value("color").ok().as_deref(),
        Some("")
    );
}

#[wasm_bindgen_test]
fn anchor_click_is_intercepted_for_existing_target() {
    reset();
    fixture(r##"<a id="jump" href="#target">jump</a><a id="bare" href="#">top</a><section id="target"></section>"##);
    anchors::attach(&dom::document().expect("document"));
    let init = web_sys::EventInit::new();
    init.set_cancelable(true);
    let click = Event::new_with_event_init_dict("click", &init).expect("click event");
    html_el("#jump").dispatch_event(&click).expect("dispatch");
    assert!(click.default_prevented());

    let click = Event::new_with_event_init_dict("click", &init).expect("click event");
    html_el("#bare").dispatch_event(&click).expect("dispatch");
    assert!(click.default_prevented());
}

#[wasm_bindgen_test]
fn hover_scales_marker_and_restores() {
    reset();
    fixture(r#"<span class="timeline-marker" id="marker"></span>"#);
    let marker = html_el("#marker");
    decor::on_hover(&marker, Hover::Enter);
    assert_eq!(
        marker.style().get_property_value("transform").ok().as_deref(),
        Some("scale(1.5)")
    );
    decor::on_hover(&marker, Hover::Leave);
    assert_eq!(
        marker.style().get_property_value("transform").ok().as_deref(),
        Some("scale(1)")
    );
}

#[wasm_bindgen_test]
fn parallax_tracks_scroll_offset() {
    reset();
    fixture(r#"<section class="inspiration-section" id="inspire"></section>"#);
    decor::on_scroll();
    let scroll_y = dom::window()
        .and_then(|win| win.scroll_y().ok())
        .unwrap_or_default();
    assert_eq!(
        html_el("#inspire").style().get_property_value("transform").ok(),
        Some(format!("translateY({}px)", scroll_y * 0.3))
    );
}

#[wasm_bindgen_test]
fn parallax_without_section_is_a_no_op() {
    reset();
    fixture("");
    decor::on_scroll();
}

#[wasm_bindgen_test]
async fn counter_reaches_its_target() {
    reset();
    fixture(r#"<span class="stat-value" id="stat">42</span>"#);
    let el = html_el("#stat");
    counter::run(el.clone(), CounterAnimation::new(0, CounterEnd::Number(42), 150));
    assert_eq!(page::snapshot().counters_running, 1);
    dom::sleep_ms(600).await.expect("sleep");
    assert_eq!(el.text_content().as_deref(), Some("42"));
    let snap = page::snapshot();
    assert_eq!(snap.counters_running, 0);
    assert_eq!(snap.counters_finished, 1);
}

#[wasm_bindgen_test]
async fn counter_stops_when_element_is_removed() {
    reset();
    fixture(r#"<span class="stat-value" id="stat">500</span>"#);
    let el = html_el("#stat");
    counter::run(el.clone(), CounterAnimation::new(0, CounterEnd::Number(500), 5_000));
    el.remove();
    dom::sleep_ms(200).await.expect("sleep");
    let snap = page::snapshot();
    assert_eq!(snap.counters_running, 0);
    assert_eq!(snap.counters_finished, 0);
}

#[wasm_bindgen_test]
async fn pulse_clears_itself_once_its_bar_is_removed() {
    let mut config = FxConfig::default();
    config.pulse.base_interval_ms = 40;
    config.pulse.step_ms = 10;
    install(config);
    fixture(r#"<div class="bar" id="bar-a"></div><div class="bar" id="bar-b"></div>"#);
    decor::start_pulses(&dom::document().expect("document"));
    assert_eq!(page::snapshot().pulses_active, 2);

    dom::sleep_ms(250).await.expect("sleep");
    assert_eq!(inline_style("#bar-a", "transition"), "opacity 0.5s ease");

    html_el("#bar-b").remove();
    dom::sleep_ms(200).await.expect("sleep");
    assert_eq!(page::snapshot().pulses_active, 1);

    html_el("#bar-a").remove();
    dom::sleep_ms(200).await.expect("sleep");
    assert_eq!(page::snapshot().pulses_active, 0);
}

#[wasm_bindgen_test]
async fn visible_card_enters_once_through_the_observer() {
    let mut config = FxConfig::default();
    config.entrance.delay_ms = 20;
    install(config);
    fixture(
        r#"<div class="stat-card" id="card" style="height:40px"><span class="stat-value">7</span></div>"#,
    );
    viewport::attach(&dom::document().expect("document"));
    assert_eq!(page::snapshot().entrances_pending, 1);

    dom::sleep_ms(300).await.expect("sleep");
    assert_eq!(page::snapshot().entrances_pending, 0);
    assert_eq!(inline_style("#card", "opacity"), "1");
    assert_eq!(inline_style("#card", "transform"), "translateY(0px)");
    assert_eq!(inline_style("#card", "transition"), "all 0.6s ease");

    // Unobserved after the first entrance: a later layout change must not replay it.
    html_el("#card").style().set_property("opacity", "0.25").expect("set opacity");
    html_el("#card").style().set_property("margin-top", "1px").expect("nudge");
    dom::sleep_ms(200).await.expect("sleep");
    assert_eq!(inline_style("#card", "opacity"), "0.25");
    page::with_page(|page| assert_eq!(page.entrances.len(), 1));
}

#[wasm_bindgen_test]
async fn timeline_items_cascade_in_index_order() {
    let mut config = FxConfig::default();
    config.stagger.step_ms = 400;
    install(config);
    fixture(
        r#"<div class="timeline-item" id="step-0"></div><div class="timeline-item" id="step-1"></div>"#,
    );
    viewport::attach(&dom::document().expect("document"));
    assert_eq!(inline_style("#step-1", "opacity"), "0");
    assert_eq!(inline_style("#step-1", "transform"), "translateX(-20px)");

    dom::sleep_ms(150).await.expect("sleep");
    assert_eq!(inline_style("#step-0", "opacity"), "1");
    assert_eq!(inline_style("#step-1", "opacity"), "0");

    dom::sleep_ms(500).await.expect("sleep");
    assert_eq!(inline_style("#step-1", "opacity"), "1");
    assert_eq!(inline_style("#step-1", "transform"), "translateX(0px)");
}
