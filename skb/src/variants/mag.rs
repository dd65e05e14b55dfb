//! Microsoft Academic Graph knowledge base.

dataset_variant!(
    /// Academic knowledge base. Retrieval candidates are `paper` entities.
    MagSkb,
    "mag",
    candidates = Some("paper"),
    title = "title"
);
