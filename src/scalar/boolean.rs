use super::scalar_model;

scalar_model! {
    /// A flag, `false` by default.
    Boolean {
        kind: "Bool",
        field: bool: bool = false,
        input: bool,
    }
}

impl Boolean {
    /// Flip the flag.
    pub fn toggle(&mut self) {
        let flipped = !self.bool;
        self.set(flipped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Model;

    #[test]
    fn toggle_and_reset() {
        let mut flag = Boolean::new("active", "Active");
        flag.toggle();
        assert!(*flag.get());

        flag.toggle();
        assert!(!*flag.get());

        flag.set(true);
        flag.reset();
        assert!(!*flag.get());
    }

    #[test]
    fn round_trip() {
        let mut source = Boolean::default();
        source.set(true);

        let mut target = Boolean::default();
        target.restore(&source.extract()).unwrap();
        assert!(*target.get());
    }
}
