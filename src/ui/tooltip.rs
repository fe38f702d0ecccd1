use crate::tree::arena::{Hierarchy, NodeId};

const UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count into a human-readable size string (base 1024).
///
/// Uses `decimals` fraction digits with trailing zeros dropped, so `1536` becomes
/// `"1.5 KB"` and `1024` becomes `"1 KB"`.
pub fn format_bytes(bytes: f64, decimals: usize) -> String {
    if bytes == 0.0 {
        return "0 Bytes".to_string();
    }

    let k = 1024_f64;
    let exponent = (bytes.ln() / k.ln()).floor().clamp(0.0, (UNITS.len() - 1) as f64);
    let scaled = bytes / k.powf(exponent);

    let mut digits = format!("{:.*}", decimals, scaled);
    if digits.contains('.') {
        let trimmed = digits.trim_end_matches('0').trim_end_matches('.').len();
        digits.truncate(trimmed);
    }
    format!("{} {}", digits, UNITS[exponent as usize])
}

/// Hover title for a node: icon, slash-joined path and formatted size.
pub fn build_title(tree: &Hierarchy, node_id: NodeId) -> String {
    let node = tree.get(node_id);
    let icon = if node.is_leaf() { "📋" } else { "🗂️" };
    format!(
        "{} {}\n{}",
        icon,
        tree.path_with(node_id, "/"),
        format_bytes(node.value, 2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{build, raw::RawNode};

    #[test]
    fn formats_like_the_size_labels() {
        assert_eq!(format_bytes(0.0, 2), "0 Bytes");
        assert_eq!(format_bytes(512.0, 2), "512 Bytes");
        assert_eq!(format_bytes(1024.0, 2), "1 KB");
        assert_eq!(format_bytes(1536.0, 2), "1.5 KB");
        assert_eq!(format_bytes(1_234_567.0, 2), "1.18 MB");
        assert_eq!(format_bytes(3.0 * 1024_f64.powi(4), 0), "3 TB");
    }

    #[test]
    fn fractional_bytes_stay_in_bytes() {
        assert_eq!(format_bytes(0.5, 2), "0.5 Bytes");
    }

    #[test]
    fn title_uses_slash_path_and_icon() {
        let tree = build(&RawNode::internal(
            "home",
            vec![RawNode::internal("docs", vec![RawNode::leaf("cv.pdf", 2048.0)])],
        ))
        .unwrap();
        let docs = tree.find_child(tree.root(), "docs").unwrap();
        let cv = tree.find_child(docs, "cv.pdf").unwrap();
        assert_eq!(build_title(&tree, cv), "📋 home/docs/cv.pdf\n2 KB");
        assert!(build_title(&tree, docs).starts_with("🗂️ home/docs\n"));
    }
}
