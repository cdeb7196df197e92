mod helpers;

#[test]
fn fixtures_are_present_and_readable() {
    let report = helpers::read_fixture_text("dma_controller_coverage.txt");
    assert!(report.contains("Design: dma_controller"));

    let suggestions = helpers::read_fixture_text("suggestions.json");
    assert!(suggestions.trim_start().starts_with('['));
}
