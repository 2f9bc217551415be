use dossier::domain::DocumentType;

#[test]
fn given_exact_labels_when_parsing_then_every_type_round_trips() {
    for doc_type in DocumentType::ALL {
        assert_eq!(DocumentType::from_label(doc_type.as_str()), Some(doc_type));
    }
}

#[test]
fn given_loosely_formatted_label_when_parsing_then_ignores_case_and_separators() {
    assert_eq!(
        DocumentType::from_label("balance sheet"),
        Some(DocumentType::BalanceSheet)
    );
    assert_eq!(
        DocumentType::from_label("profit_and_loss-statement"),
        Some(DocumentType::ProfitAndLossStatement)
    );
    assert_eq!(DocumentType::from_label("INVOICE"), Some(DocumentType::Invoice));
}

#[test]
fn given_unknown_label_when_parsing_then_returns_none() {
    assert_eq!(DocumentType::from_label("Receipt"), None);
    assert_eq!(DocumentType::from_label(""), None);
}

#[test]
fn given_default_when_created_then_is_general_document() {
    assert_eq!(DocumentType::default(), DocumentType::GeneralDocument);
}

#[test]
fn given_document_type_when_serialized_then_uses_canonical_label() {
    let json = serde_json::to_string(&DocumentType::ProfitAndLossStatement).unwrap();

    assert_eq!(json, "\"ProfitAndLossStatement\"");
    assert_eq!(DocumentType::Contract.to_string(), "Contract");
}
