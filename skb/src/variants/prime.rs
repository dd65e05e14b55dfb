//! PrimeKG biomedical knowledge base.

dataset_variant!(
    /// Biomedical knowledge base. Every entity is a retrieval candidate and
    /// entities are titled by their `name`.
    PrimeSkb,
    "prime",
    candidates = None,
    title = "name"
);
