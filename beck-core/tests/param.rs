#[cfg(test)]
mod tests {
    use beck_core::ParameterKey;

    #[test]
    fn integer_keys_keep_their_face_value() {
        assert_eq!(ParameterKey::from(7u32), ParameterKey::Index(7));
        assert_eq!(ParameterKey::from(-3i32), ParameterKey::Index(-3));
        assert_eq!(ParameterKey::from(-3i32).to_string(), "$-3");
        assert_eq!(
            ParameterKey::from(usize::MAX),
            ParameterKey::Index(i64::MAX)
        );
    }

    #[test]
    fn keys_render_in_placeholder_syntax() {
        assert_eq!(ParameterKey::Index(2).to_string(), "$2");
        assert_eq!(ParameterKey::from("owner").to_string(), ":owner");
    }
}
