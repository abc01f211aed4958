use std::path::{Component, Path};

pub const DEFAULT_CAR_IMAGE: &str = "defaults/default_car_image.jpg";

const MAX_MEDIA_PATH: usize = 255;

/// Normalize a client-supplied media reference into a relative path under the media root.
///
/// Only plain path segments are accepted: no root, drive prefix, `.` or `..`, no backslashes
/// and no control characters.
pub fn sanitize_media_path(raw: &str) -> Result<String, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Media path must not be empty.");
    }
    if raw.len() > MAX_MEDIA_PATH {
        return Err("Media path is too long.");
    }
    if raw.contains('\\') || raw.chars().any(char::is_control) {
        return Err("Media path contains invalid characters.");
    }

    let mut segments = Vec::new();
    for component in Path::new(raw).components() {
        match component {
            Component::Normal(segment) => match segment.to_str() {
                Some(s) => segments.push(s),
                None => return Err("Media path contains invalid characters."),
            },
            Component::CurDir => return Err("Media path must not contain '.' segments."),
            Component::ParentDir => return Err("Media path must not contain '..' segments."),
            Component::RootDir | Component::Prefix(_) => {
                return Err("Media path must be relative.");
            }
        }
    }

    if segments.is_empty() {
        return Err("Media path must not be empty.");
    }
    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_relative_paths() {
        assert_eq!(
            sanitize_media_path(" car_images/tesla.jpg ").unwrap(),
            "car_images/tesla.jpg"
        );
        assert_eq!(
            sanitize_media_path("documents//title.pdf").unwrap(),
            "documents/title.pdf"
        );
    }

    #[test]
    fn rejects_traversal_and_absolute_paths() {
        assert!(sanitize_media_path("../etc/passwd").is_err());
        assert!(sanitize_media_path("car_images/../../secret").is_err());
        assert!(sanitize_media_path("/etc/passwd").is_err());
        assert!(sanitize_media_path("./car.jpg").is_err());
        assert!(sanitize_media_path("..\\windows\\system32").is_err());
    }

    #[test]
    fn rejects_empty_and_oversized_paths() {
        assert!(sanitize_media_path("   ").is_err());
        assert!(sanitize_media_path(&"a".repeat(300)).is_err());
        assert!(sanitize_media_path("car\u{0}.jpg").is_err());
    }
}
