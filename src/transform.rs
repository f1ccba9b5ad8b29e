//! Lenient parsing of 3MF affine transform attributes
//!
//! A transform attribute holds twelve whitespace-separated numbers forming a
//! 4x3 matrix in row-major order: the first nine are the rotation/scale block,
//! the last three (indices 9..=11) are the translation.
//!
//! Unlike a conformance parser, this one never rejects a transform. Real
//! slicer packages occasionally carry truncated or garbled values and the
//! report must still be produced.

use serde::Serialize;

/// Number of values in a 3MF transform attribute
pub const TRANSFORM_MATRIX_SIZE: usize = 12;

/// Identity matrix in 3MF attribute layout
pub const IDENTITY: [f64; TRANSFORM_MATRIX_SIZE] =
    [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];

/// A 4x3 affine transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform3D {
    /// Matrix values in attribute order
    pub matrix: [f64; TRANSFORM_MATRIX_SIZE],
}

impl Transform3D {
    /// The identity transform
    pub const fn identity() -> Self {
        Self { matrix: IDENTITY }
    }

    /// Parse a transform attribute value.
    ///
    /// - empty input or a token count other than twelve yields the identity
    /// - a token that is not a number leaves its slot at `0.0`
    ///
    /// # Example
    ///
    /// ```
    /// use threemf_analyzer::Transform3D;
    ///
    /// let t = Transform3D::parse("1 0 0 0 1 0 0 0 1 10 20 30");
    /// assert_eq!(t.translation(), [10.0, 20.0, 30.0]);
    ///
    /// assert_eq!(Transform3D::parse("1 0 0"), Transform3D::identity());
    /// ```
    pub fn parse(value: &str) -> Self {
        let tokens: Vec<&str> = value.split_whitespace().collect();
        if tokens.len() != TRANSFORM_MATRIX_SIZE {
            return Self::identity();
        }

        let mut matrix = [0.0; TRANSFORM_MATRIX_SIZE];
        for (slot, token) in matrix.iter_mut().zip(tokens) {
            if let Ok(v) = token.parse::<f64>() {
                *slot = v;
            }
        }
        Self { matrix }
    }

    /// Parse an optional attribute, treating absence like an empty string
    pub fn parse_opt(value: Option<&str>) -> Self {
        value.map_or_else(Self::identity, Self::parse)
    }

    /// Translation components (x, y, z)
    pub fn translation(&self) -> [f64; 3] {
        [self.matrix[9], self.matrix[10], self.matrix[11]]
    }

    /// True when the matrix equals the identity
    pub fn is_identity(&self) -> bool {
        self.matrix == IDENTITY
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}
