//! Catalog reference data
//!
//! Fixed category and subsection lists. Items reference them by value.

use super::{CatalogInfo, Subsection};

/// Document categories
pub const CATEGORIES: [&str; 12] = [
    "y học thể dục thể thao",
    "sức khỏe cộng đồng",
    "nhi",
    "điều trị nội",
    "dược lâm sàng",
    "ung bướu",
    "tâm lý y học 2",
    "sản phụ khoa",
    "nhiễm",
    "dịch tễ học",
    "chấn thương chỉnh hình",
    "chẩn đoán hình ảnh",
];

/// Subsections as `(key, display name)`
pub const SUBSECTIONS: [(&str, &str); 5] = [
    ("lythuyet", "Lý thuyết"),
    ("video", "Video bài giảng"),
    ("tracnghiem", "Trắc nghiệm"),
    ("detuluyen", "Đề tự luyện"),
    ("dechinhthuc", "Đề chính thức các năm"),
];

/// Display name for a subsection key, falling back to the key itself
pub fn subsection_name(key: &str) -> String {
    SUBSECTIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Reference lists as served to clients
pub fn catalog_info() -> CatalogInfo {
    CatalogInfo {
        categories: CATEGORIES.iter().map(|c| (*c).to_string()).collect(),
        subs: SUBSECTIONS
            .iter()
            .map(|(key, name)| Subsection {
                key: (*key).to_string(),
                name: (*name).to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsection_name_lookup() {
        assert_eq!(subsection_name("video"), "Video bài giảng");
        assert_eq!(subsection_name("unknown"), "unknown");
    }

    #[test]
    fn test_catalog_info_shape() {
        let info = catalog_info();
        assert_eq!(info.categories.len(), 12);
        assert_eq!(info.subs.len(), 5);
        assert_eq!(info.subs[0].key, "lythuyet");
    }
}
