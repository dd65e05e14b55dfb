//! Amazon product knowledge base.

dataset_variant!(
    /// Product knowledge base. Retrieval candidates are `product` entities.
    AmazonSkb,
    "amazon",
    candidates = Some("product"),
    title = "title"
);
