use super::scalar_model;

scalar_model! {
    /// A number, zero by default.
    ///
    /// Non-finite values have no JSON form and are extracted as `null`,
    /// which restores as zero.
    Number {
        kind: "Number",
        field: val: f64 = 0.0,
        input: f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Model;
    use serde_json::json;

    #[test]
    fn round_trip() {
        let mut source = Number::new("price", "Price");
        source.set(12.5);

        let snapshot = source.extract();
        assert_eq!(snapshot.get("val"), Some(&json!(12.5)));

        let mut target = Number::default();
        target.restore(&snapshot).unwrap();
        assert_eq!(*target.get(), 12.5);
    }

    #[test]
    fn non_finite_restores_as_zero() {
        let mut source = Number::default();
        source.set(f64::NAN);

        let snapshot = source.extract();
        assert_eq!(snapshot.get("val"), Some(&json!(null)));

        let mut target = Number::default();
        target.set(3.0);
        target.restore(&snapshot).unwrap();
        assert_eq!(*target.get(), 0.0);
    }

    #[test]
    fn wrong_type_fails_restore() {
        let mut snapshot = Number::default().extract();
        snapshot.insert("val", json!("twelve"));

        let mut target = Number::default();
        assert!(target.restore(&snapshot).is_err());
    }
}
