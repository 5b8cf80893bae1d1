//! Preparing product records before they are saved to the catalog.

use crate::catalog::Product;
use crate::error::CommerceError;

/// Split capability text into lines.
///
/// Editors paste specs as one block of text, so every entry is split on
/// newlines, trimmed, and blank lines are dropped.
pub fn normalize_specs<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .flat_map(|entry| {
            entry
                .as_ref()
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

fn trimmed_non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Check and clean a product before it is created or updated.
///
/// A name and a positive price are required. Specs are normalized, blank
/// image URLs and keywords are dropped, and the id is trimmed (a blank id
/// is left for the catalog to assign).
pub fn prepare_for_save(mut product: Product) -> Result<Product, CommerceError> {
    product.name = product.name.trim().to_string();
    if product.name.is_empty() {
        return Err(CommerceError::validation("name", "Заполните название и цену"));
    }
    if product.price <= 0 {
        return Err(CommerceError::validation("price", "Заполните название и цену"));
    }

    product.id = product.id.as_str().trim().into();
    product.specs = normalize_specs(&product.specs);
    product.additional_images = trimmed_non_blank(product.additional_images);
    product.image = product.image.filter(|url| !url.trim().is_empty());
    if let Some(meta) = product.meta.as_mut() {
        meta.keywords = trimmed_non_blank(std::mem::take(&mut meta.keywords));
    }

    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductMeta;

    #[test]
    fn test_normalize_specs_splits_pasted_block() {
        let specs = normalize_specs(["Процессор: S905W\n\n  Оперативная память: 4 ГБ  \r\n"]);
        assert_eq!(specs, vec!["Процессор: S905W", "Оперативная память: 4 ГБ"]);
    }

    #[test]
    fn test_normalize_specs_keeps_separate_entries() {
        let specs = normalize_specs(vec!["Wi-Fi 5".to_string(), " ".to_string(), "HDMI 2.1".to_string()]);
        assert_eq!(specs, vec!["Wi-Fi 5", "HDMI 2.1"]);
    }

    #[test]
    fn test_prepare_for_save_cleans_fields() {
        let mut product = Product::new(" 12 ", " VONTAR W2 ", 4000)
            .with_specs(["Оперативная память: 4 ГБ\nВстроенная память: 32 ГБ"])
            .with_image(" ");
        product.additional_images = vec!["https://i.example/a.jpg".into(), "".into()];
        product.meta = Some(ProductMeta {
            keywords: vec![" vontar ".into(), "".into()],
            ..ProductMeta::default()
        });

        let product = prepare_for_save(product).unwrap();
        assert_eq!(product.id.as_str(), "12");
        assert_eq!(product.name, "VONTAR W2");
        assert_eq!(product.specs.len(), 2);
        assert_eq!(product.image, None);
        assert_eq!(product.additional_images, vec!["https://i.example/a.jpg"]);
        assert_eq!(product.meta.unwrap().keywords, vec!["vontar"]);
    }

    #[test]
    fn test_prepare_for_save_requires_name_and_price() {
        let err = prepare_for_save(Product::new("", "  ", 4000)).unwrap_err();
        assert!(matches!(err, CommerceError::Validation { field: "name", .. }));

        let err = prepare_for_save(Product::new("", "ZTE B866", 0)).unwrap_err();
        assert!(matches!(err, CommerceError::Validation { field: "price", .. }));
    }

    #[test]
    fn test_blank_id_is_not_serialized() {
        let product = prepare_for_save(Product::new("", "ZTE B866", 2800)).unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["name"], "ZTE B866");
    }
}
