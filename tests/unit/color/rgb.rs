//! Tests for color construction, validation and distance

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::color::Color;

    // Tests in-range channels convert
    // Verified by rejecting zero channels
    #[test]
    fn test_from_channels_accepts_bounds() {
        let color = Color::from_channels("edge.png", [0, 128, 255]).unwrap();

        assert_eq!(color, Color::new(0, 128, 255));
    }

    // Tests channels above 255 are rejected with the identifier
    // Verified by saturating instead of rejecting
    #[test]
    fn test_from_channels_rejects_overflow() {
        let result = Color::from_channels("bright.png", [256, 0, 0]);

        match result {
            Err(MosaicError::InvalidColor {
                identifier,
                channels,
            }) => {
                assert_eq!(identifier, "bright.png");
                assert_eq!(channels, [256, 0, 0]);
            }
            _ => unreachable!("Expected InvalidColor error type"),
        }
    }

    // Tests negative channels are rejected
    // Verified by wrapping negatives
    #[test]
    fn test_from_channels_rejects_negative() {
        assert!(Color::from_channels("dark.png", [0, -1, 0]).is_err());
    }

    // Tests squared distance sums channel differences
    // Verified by dropping the blue channel
    #[test]
    fn test_distance_squared() {
        let a = Color::new(10, 20, 30);
        let b = Color::new(13, 16, 30);

        assert_eq!(a.distance_squared(b), 25);
        assert_eq!(b.distance_squared(a), 25);
        assert_eq!(a.distance_squared(a), 0);
    }

    // Tests maximum distance fits without overflow
    // Verified by computing in u8
    #[test]
    fn test_distance_extremes() {
        let black = Color::new(0, 0, 0);
        let white = Color::new(255, 255, 255);

        assert_eq!(black.distance_squared(white), 3 * 255 * 255);
    }

    // Tests display format matches tuple notation
    // Verified by changing separator
    #[test]
    fn test_display() {
        assert_eq!(Color::new(1, 2, 3).to_string(), "(1, 2, 3)");
        assert_eq!(Color::from([4, 5, 6]).channels(), [4, 5, 6]);
    }
}
