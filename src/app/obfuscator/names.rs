use rand::rngs::ThreadRng;
use rand::Rng;
use std::collections::HashSet;

use super::options::IdentifierNamesGenerator;

/// Hands out identifiers that collide with nothing reserved so far.
pub struct NameGenerator {
    style: IdentifierNamesGenerator,
    reserved: HashSet<String>,
    rng: ThreadRng,
}

impl NameGenerator {
    pub fn new(style: IdentifierNamesGenerator) -> Self {
        Self {
            style,
            reserved: HashSet::new(),
            rng: rand::thread_rng(),
        }
    }

    pub fn reserve_all<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(names.into_iter().map(Into::into));
    }

    pub fn next_name(&mut self) -> String {
        loop {
            let candidate = match self.style {
                IdentifierNamesGenerator::Hexadecimal => {
                    format!("_0x{:x}", self.rng.gen_range(0x1000..=0xff_ffffu32))
                }
            };
            if self.reserved.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hexadecimal_names_have_expected_shape() {
        let mut names = NameGenerator::new(IdentifierNamesGenerator::Hexadecimal);
        for _ in 0..100 {
            let name = names.next_name();
            let digits = name.strip_prefix("_0x").unwrap();
            assert!((4..=6).contains(&digits.len()), "{name}");
            assert!(digits.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn names_are_never_repeated() {
        let mut names = NameGenerator::new(IdentifierNamesGenerator::Hexadecimal);
        let issued: HashSet<String> = (0..500).map(|_| names.next_name()).collect();
        assert_eq!(issued.len(), 500);
    }

    #[test]
    fn reserved_names_are_never_issued() {
        let mut names = NameGenerator::new(IdentifierNamesGenerator::Hexadecimal);
        let first = names.next_name();

        let mut fresh = NameGenerator::new(IdentifierNamesGenerator::Hexadecimal);
        fresh.reserve_all([first.clone()]);
        assert!((0..200).all(|_| fresh.next_name() != first));
    }
}
