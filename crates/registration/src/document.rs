//! Registration documents: the identifier each profile kind must supply.
//!
//! - Ordinary person: CPF (individual tax id), 11 digits, two modulo-11
//!   check digits.
//! - Department: CNPJ (organisation tax id), 14 digits, two modulo-11 check
//!   digits with cyclic weights.
//! - Veterinary practice: CRMV registry number, exactly 6 digits, no
//!   checksum.
//!
//! Parsing never fails loudly: malformed input is simply not a document.

use vetforum_core::ValueObject;

use crate::ProfileKind;

/// Individual tax identifier (CPF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpf([u8; 11]);

/// Organisation tax identifier (CNPJ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cnpj([u8; 14]);

/// Veterinary medicine registry number (CRMV).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crmv([u8; 6]);

impl ValueObject for Cpf {}
impl ValueObject for Cnpj {}
impl ValueObject for Crmv {}

/// Well-known CPF used in documentation and fake data generators.
const CPF_SAMPLE: [u8; 11] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 9];

impl Cpf {
    /// Parse `000.000.000-00`, `00000000000` or any other separator layout.
    pub fn parse(input: &str) -> Option<Self> {
        let digits: [u8; 11] = ascii_digits(input).try_into().ok()?;
        if all_same(&digits) || digits == CPF_SAMPLE {
            return None;
        }
        let (body, check) = digits.split_at(9);
        if cpf_check_digits(body) != [check[0], check[1]] {
            return None;
        }
        Some(Self(digits))
    }

    pub fn digits(&self) -> &[u8; 11] {
        &self.0
    }

    /// Canonical masked form `000.000.000-00`.
    pub fn formatted(&self) -> String {
        let d = render(&self.0);
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

impl Cnpj {
    /// Parse `00.000.000/0000-00`, `00000000000000` or any other separator layout.
    pub fn parse(input: &str) -> Option<Self> {
        let digits: [u8; 14] = ascii_digits(input).try_into().ok()?;
        if all_same(&digits) {
            return None;
        }
        let (body, check) = digits.split_at(12);
        if cnpj_check_digits(body) != [check[0], check[1]] {
            return None;
        }
        Some(Self(digits))
    }

    pub fn digits(&self) -> &[u8; 14] {
        &self.0
    }

    /// Canonical masked form `00.000.000/0000-00`.
    pub fn formatted(&self) -> String {
        let d = render(&self.0);
        format!(
            "{}.{}.{}/{}-{}",
            &d[0..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..14]
        )
    }
}

impl Crmv {
    /// Exactly six ASCII digits. No punctuation or whitespace is tolerated.
    pub fn parse(input: &str) -> Option<Self> {
        if input.len() != 6 || !input.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let mut digits = [0u8; 6];
        for (slot, b) in digits.iter_mut().zip(input.bytes()) {
            *slot = b - b'0';
        }
        Some(Self(digits))
    }

    pub fn formatted(&self) -> String {
        render(&self.0)
    }
}

/// Check `document` against the scheme of the selected profile kind.
pub fn validate_document(kind: ProfileKind, document: &str) -> bool {
    match kind {
        ProfileKind::OrdinaryPerson => Cpf::parse(document).is_some(),
        ProfileKind::VeterinaryPractice => Crmv::parse(document).is_some(),
        ProfileKind::Department => Cnpj::parse(document).is_some(),
    }
}

/// Render a valid document in its canonical masked form, or `None` if it
/// does not validate for `kind`.
pub fn format_document(kind: ProfileKind, document: &str) -> Option<String> {
    match kind {
        ProfileKind::OrdinaryPerson => Cpf::parse(document).map(|d| d.formatted()),
        ProfileKind::VeterinaryPractice => Crmv::parse(document).map(|d| d.formatted()),
        ProfileKind::Department => Cnpj::parse(document).map(|d| d.formatted()),
    }
}

/// Keep only the ASCII digits. Masks, spaces and any other separators are
/// dropped; the length check afterwards rejects what is left over.
fn ascii_digits(input: &str) -> Vec<u8> {
    input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

fn all_same(digits: &[u8]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

fn render(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Modulo-11 verifier: remainders 0 and 1 map to 0, otherwise `11 - r`.
fn mod11_digit(weighted_sum: u32) -> u8 {
    match weighted_sum % 11 {
        0 | 1 => 0,
        r => (11 - r) as u8,
    }
}

/// CPF weights run from `len + 1` down to 2.
fn cpf_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum = digits
        .iter()
        .enumerate()
        .map(|(i, d)| u32::from(*d) * (top - i as u32))
        .sum();
    mod11_digit(sum)
}

/// CNPJ weights cycle 2..=9 starting from the rightmost digit.
fn cnpj_digit(digits: &[u8]) -> u8 {
    let sum = digits
        .iter()
        .rev()
        .zip((2u32..=9).cycle())
        .map(|(d, w)| u32::from(*d) * w)
        .sum();
    mod11_digit(sum)
}

pub(crate) fn cpf_check_digits(body: &[u8]) -> [u8; 2] {
    let first = cpf_digit(body);
    let mut extended = body.to_vec();
    extended.push(first);
    [first, cpf_digit(&extended)]
}

pub(crate) fn cnpj_check_digits(body: &[u8]) -> [u8; 2] {
    let first = cnpj_digit(body);
    let mut extended = body.to_vec();
    extended.push(first);
    [first, cnpj_digit(&extended)]
}
