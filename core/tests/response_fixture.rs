//! The extractor against a captured Azure simulator response.
use collapse_core::api::{extract_histogram, DuplicateLabels};

const EXPECTED: [&str; 16] = [
    "|0000⟩", "|1000⟩", "|0100⟩", "|1100⟩", "|0010⟩", "|1010⟩", "|0110⟩", "|1110⟩", "|0001⟩",
    "|1001⟩", "|0101⟩", "|1101⟩", "|0011⟩", "|1011⟩", "|0111⟩", "|1111⟩",
];

#[test]
fn test_basic_azure_simulator_output() {
    let contents = include_str!("fixtures/azure_simulator.txt");

    let result = extract_histogram(contents, DuplicateLabels::Overwrite);

    assert_eq!(result.len(), 16);
    for (i, (label, weight)) in result.iter().enumerate() {
        assert_eq!(label, EXPECTED[i]);
        assert_eq!(*weight, 0.0625);
    }
}
