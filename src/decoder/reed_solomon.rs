/// Reed-Solomon error correction for QR codes
/// QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
/// and generator base 0
const PRIMITIVE: u16 = 0x011D;

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 256 {
        exp[i] = x as u8;
        x *= 2;
        if x >= 256 {
            x = (x ^ PRIMITIVE) & 0xFF;
        }
        i += 1;
    }
    let mut i = 0;
    while i < 255 {
        log[exp[i] as usize] = i as u8;
        i += 1;
    }
    (exp, log)
}

static TABLES: ([u8; 256], [u8; 256]) = build_tables();

/// GF(256) field operations using log/exp tables
pub struct Gf256;

impl Gf256 {
    /// alpha^n for n in 0..=255
    #[inline]
    pub fn exp(n: usize) -> u8 {
        TABLES.0[n % 256]
    }

    /// Discrete log; `None` for 0
    #[inline]
    pub fn log(a: u8) -> Option<usize> {
        (a != 0).then(|| TABLES.1[a as usize] as usize)
    }

    #[inline]
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = TABLES.1[a as usize] as usize;
        let log_b = TABLES.1[b as usize] as usize;
        TABLES.0[(log_a + log_b) % 255]
    }

    /// Multiplicative inverse; `None` for 0
    #[inline]
    pub fn inverse(a: u8) -> Option<u8> {
        Self::log(a).map(|log| TABLES.0[255 - log])
    }
}

/// Polynomial over GF(256), highest-degree coefficient first.
///
/// Leading zeros are stripped on construction, so only the zero polynomial
/// starts with 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GfPoly {
    coefficients: Vec<u8>,
}

impl GfPoly {
    pub fn new(coefficients: Vec<u8>) -> Self {
        match coefficients.iter().position(|&c| c != 0) {
            Some(0) => Self { coefficients },
            Some(first) => Self {
                coefficients: coefficients[first..].to_vec(),
            },
            None => Self::zero(),
        }
    }

    pub fn zero() -> Self {
        Self {
            coefficients: vec![0],
        }
    }

    pub fn one() -> Self {
        Self {
            coefficients: vec![1],
        }
    }

    /// `coefficient * x^degree`
    pub fn monomial(degree: usize, coefficient: u8) -> Self {
        if coefficient == 0 {
            return Self::zero();
        }
        let mut coefficients = vec![0u8; degree + 1];
        coefficients[0] = coefficient;
        Self { coefficients }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients[0] == 0
    }

    /// Coefficient of `x^degree`
    pub fn coefficient(&self, degree: usize) -> u8 {
        self.coefficients[self.coefficients.len() - 1 - degree]
    }

    pub fn add(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        let (smaller, larger) = if self.coefficients.len() > other.coefficients.len() {
            (&other.coefficients, &self.coefficients)
        } else {
            (&self.coefficients, &other.coefficients)
        };
        let offset = larger.len() - smaller.len();
        let mut sum = larger.clone();
        for (i, &c) in smaller.iter().enumerate() {
            sum[offset + i] ^= c;
        }
        Self::new(sum)
    }

    pub fn scale(&self, scalar: u8) -> Self {
        match scalar {
            0 => Self::zero(),
            1 => self.clone(),
            _ => Self::new(self.coefficients.iter().map(|&c| Gf256::mul(c, scalar)).collect()),
        }
    }

    pub fn multiply(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut product = vec![0u8; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in other.coefficients.iter().enumerate() {
                product[i + j] ^= Gf256::mul(a, b);
            }
        }
        Self::new(product)
    }

    /// `self * coefficient * x^degree`
    pub fn multiply_by_monomial(&self, degree: usize, coefficient: u8) -> Self {
        if coefficient == 0 {
            return Self::zero();
        }
        let mut product = vec![0u8; self.coefficients.len() + degree];
        for (out, &c) in product.iter_mut().zip(&self.coefficients) {
            *out = Gf256::mul(c, coefficient);
        }
        Self::new(product)
    }

    pub fn evaluate_at(&self, a: u8) -> u8 {
        match a {
            0 => self.coefficient(0),
            1 => self.coefficients.iter().fold(0, |acc, &c| acc ^ c),
            _ => self.coefficients[1..]
                .iter()
                .fold(self.coefficients[0], |acc, &c| Gf256::mul(a, acc) ^ c),
        }
    }
}

/// Reed-Solomon decoder for QR codes
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks carrying `num_ecc_codewords` EC codewords
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct up to `num_ecc_codewords / 2` symbol errors in `received`
    /// (data codewords followed by EC codewords). Returns the corrected
    /// codeword, or `None` when the errors cannot be located.
    pub fn decode(&self, received: &[u8]) -> Option<Vec<u8>> {
        let mut output = received.to_vec();
        let two_s = self.num_ecc_codewords;
        let syndrome_coefficients = syndromes(received, two_s);
        if syndrome_coefficients.iter().all(|&s| s == 0) {
            return Some(output);
        }

        let syndrome = GfPoly::new(syndrome_coefficients);
        let (sigma, omega) = run_euclidean(GfPoly::monomial(two_s, 1), syndrome, two_s)?;
        let locations = find_error_locations(&sigma)?;
        let magnitudes = find_error_magnitudes(&omega, &locations)?;

        for (&location, &magnitude) in locations.iter().zip(&magnitudes) {
            let log = Gf256::log(location)?;
            let position = output.len().checked_sub(1 + log)?;
            output[position] ^= magnitude;
        }

        if syndromes(&output, two_s).iter().any(|&s| s != 0) {
            log::trace!("correction left a nonzero syndrome");
            return None;
        }
        Some(output)
    }
}

/// Syndromes `S_i = r(alpha^i)` for `i < two_s`, highest index first
fn syndromes(codeword: &[u8], two_s: usize) -> Vec<u8> {
    let poly = GfPoly::new(codeword.to_vec());
    let mut coefficients = vec![0u8; two_s];
    for s in 0..two_s {
        coefficients[two_s - 1 - s] = poly.evaluate_at(Gf256::exp(s % 255));
    }
    coefficients
}

/// Decode one RS block with `two_s` EC codewords
pub fn decode(bytes: &[u8], two_s: usize) -> Option<Vec<u8>> {
    ReedSolomonDecoder::new(two_s).decode(bytes)
}

/// Extended Euclid on `a` and `b` until the remainder degree drops below
/// `r_degree / 2`. Returns the normalized error locator and evaluator.
fn run_euclidean(a: GfPoly, b: GfPoly, r_degree: usize) -> Option<(GfPoly, GfPoly)> {
    let (a, b) = if a.degree() < b.degree() { (b, a) } else { (a, b) };

    let mut r_last = a;
    let mut r = b;
    let mut t_last = GfPoly::zero();
    let mut t = GfPoly::one();

    while 2 * r.degree() >= r_degree {
        let r_last_last = r_last;
        let t_last_last = t_last;
        r_last = r;
        t_last = t;

        if r_last.is_zero() {
            return None;
        }
        let mut remainder = r_last_last;
        let mut quotient = GfPoly::zero();
        let leading_inverse = Gf256::inverse(r_last.coefficient(r_last.degree()))?;
        while remainder.degree() >= r_last.degree() && !remainder.is_zero() {
            let degree_diff = remainder.degree() - r_last.degree();
            let scale = Gf256::mul(remainder.coefficient(remainder.degree()), leading_inverse);
            quotient = quotient.add(&GfPoly::monomial(degree_diff, scale));
            remainder = remainder.add(&r_last.multiply_by_monomial(degree_diff, scale));
        }

        t = quotient.multiply(&t_last).add(&t_last_last);
        r = remainder;

        if r.degree() >= r_last.degree() {
            return None;
        }
    }

    let inverse = Gf256::inverse(t.coefficient(0))?;
    Some((t.scale(inverse), r.scale(inverse)))
}

/// Chien search: inverse roots of the error locator
fn find_error_locations(locator: &GfPoly) -> Option<Vec<u8>> {
    let num_errors = locator.degree();
    if num_errors == 0 {
        return None;
    }
    if num_errors == 1 {
        return Some(vec![locator.coefficient(1)]);
    }

    let mut locations = Vec::with_capacity(num_errors);
    for i in 1..=255u8 {
        if locations.len() >= num_errors {
            break;
        }
        if locator.evaluate_at(i) == 0 {
            locations.push(Gf256::inverse(i)?);
        }
    }
    (locations.len() == num_errors).then_some(locations)
}

/// Forney's formula
fn find_error_magnitudes(evaluator: &GfPoly, locations: &[u8]) -> Option<Vec<u8>> {
    locations
        .iter()
        .enumerate()
        .map(|(i, &location)| {
            let xi_inverse = Gf256::inverse(location)?;
            let denominator = locations
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(1u8, |acc, (_, &other)| {
                    Gf256::mul(acc, 1 ^ Gf256::mul(other, xi_inverse))
                });
            Some(Gf256::mul(
                evaluator.evaluate_at(xi_inverse),
                Gf256::inverse(denominator)?,
            ))
        })
        .collect()
}
