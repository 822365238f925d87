//! Systematic Reed-Solomon RS(255, 255-p) coding over GF(2^8).
//!
//! Encoding appends `p` parity symbols to a data block of at most `255 - p`
//! bytes. Decoding runs syndrome computation, Berlekamp-Massey, a Chien
//! search and the Forney algorithm (FCR = 0) and corrects up to `p / 2`
//! symbol errors per block. Blocks shorter than the full code length are
//! treated as shortened codes, conceptually zero-padded at the front.

use std::sync::OnceLock;

use crate::ecc::gf256;
use crate::error::MeowError;
use crate::result::Result;

/// Full Reed-Solomon block length for 8-bit symbols.
pub(crate) const BLOCK_LEN: usize = 255;

/// Generator polynomials are cached per parity tier; the wire format only
/// ever uses 16, 32 or 64 parity symbols.
fn generator(parity: usize) -> &'static Vec<u8> {
    static GEN_16: OnceLock<Vec<u8>> = OnceLock::new();
    static GEN_32: OnceLock<Vec<u8>> = OnceLock::new();
    static GEN_64: OnceLock<Vec<u8>> = OnceLock::new();

    match parity {
        16 => GEN_16.get_or_init(|| gf256::generator_poly(16)),
        32 => GEN_32.get_or_init(|| gf256::generator_poly(32)),
        64 => GEN_64.get_or_init(|| gf256::generator_poly(64)),
        _ => unreachable!("parity length {parity} is not a supported tier"),
    }
}

/// Encode one data block, returning `data || parity`.
///
/// `data.len() + parity` must not exceed [`BLOCK_LEN`].
pub(crate) fn encode_block(data: &[u8], parity: usize) -> Vec<u8> {
    debug_assert!(parity > 0);
    debug_assert!(
        data.len() + parity <= BLOCK_LEN,
        "data length {} exceeds max {} for {} parity symbols",
        data.len(),
        BLOCK_LEN - parity,
        parity
    );

    let gen = generator(parity);

    // LFSR division: the parity symbols are the remainder of
    // data(x) * x^parity mod g(x)
    let mut shift_reg = vec![0u8; parity];
    for &byte in data {
        let feedback = gf256::add(byte, shift_reg[0]);
        for j in 0..parity - 1 {
            shift_reg[j] = gf256::add(shift_reg[j + 1], gf256::mul(feedback, gen[j + 1]));
        }
        shift_reg[parity - 1] = gf256::mul(feedback, gen[parity]);
    }

    let mut codeword = Vec::with_capacity(data.len() + parity);
    codeword.extend_from_slice(data);
    codeword.extend_from_slice(&shift_reg);
    codeword
}

/// Syndromes S_i = r(alpha^i) for i in 0..parity over the padded block.
fn syndromes(block: &[u8], parity: usize) -> Vec<u8> {
    (0..parity)
        .map(|i| gf256::eval_desc(block, gf256::alpha_pow(i)))
        .collect()
}

/// Berlekamp-Massey: the error locator polynomial in ascending power order,
/// sigma[0] = 1.
fn error_locator(syndromes: &[u8]) -> Vec<u8> {
    let n = syndromes.len();

    let mut cur = vec![0u8; n + 1];
    cur[0] = 1;
    let mut cur_len = 1usize;

    let mut prev = vec![0u8; n + 1];
    prev[0] = 1;
    let mut prev_len = 1usize;

    let mut errors = 0usize;
    let mut prev_discrepancy = 1u8;
    let mut gap = 1usize;

    for r in 0..n {
        let mut discrepancy = syndromes[r];
        for i in 1..cur_len {
            discrepancy = gf256::add(discrepancy, gf256::mul(cur[i], syndromes[r - i]));
        }

        if discrepancy == 0 {
            gap += 1;
            continue;
        }

        let factor = gf256::mul(discrepancy, gf256::inv(prev_discrepancy));

        if 2 * errors <= r {
            let snapshot = cur.clone();
            let snapshot_len = cur_len;

            cur_len = (prev_len + gap).max(cur_len);
            for j in 0..prev_len {
                cur[j + gap] = gf256::add(cur[j + gap], gf256::mul(factor, prev[j]));
            }

            prev[..snapshot_len].copy_from_slice(&snapshot[..snapshot_len]);
            for slot in prev.iter_mut().skip(snapshot_len) {
                *slot = 0;
            }
            prev_len = snapshot_len;
            errors = r + 1 - errors;
            prev_discrepancy = discrepancy;
            gap = 1;
        } else {
            cur_len = (prev_len + gap).max(cur_len);
            for j in 0..prev_len {
                cur[j + gap] = gf256::add(cur[j + gap], gf256::mul(factor, prev[j]));
            }
            gap += 1;
        }
    }

    cur[..cur_len].to_vec()
}

/// Chien search over the full padded block: returns `(gf_pos, array_pos)`
/// pairs, or `None` when the locator degree does not match the root count
/// (more errors than the code can describe).
fn find_error_positions(locator: &[u8]) -> Option<Vec<(usize, usize)>> {
    let expected = locator.len() - 1;
    let mut found = Vec::with_capacity(expected);

    for p in 0..BLOCK_LEN {
        if gf256::eval_asc(locator, gf256::alpha_pow_neg(p)) == 0 {
            found.push((p, BLOCK_LEN - 1 - p));
        }
    }

    (found.len() == expected).then_some(found)
}

/// Forney algorithm: error magnitudes for the located positions.
fn error_magnitudes(locator: &[u8], syndromes: &[u8], positions: &[(usize, usize)]) -> Vec<u8> {
    let two_t = syndromes.len();

    // Omega(x) = S(x) * sigma(x) mod x^{2t}, ascending power
    let mut omega = vec![0u8; two_t];
    for i in 0..locator.len().min(two_t) {
        for j in 0..two_t {
            if i + j < two_t {
                omega[i + j] = gf256::add(omega[i + j], gf256::mul(locator[i], syndromes[j]));
            }
        }
    }

    // Formal derivative in characteristic 2: even-degree terms vanish
    let deriv_len = locator.len().saturating_sub(1);
    let mut derivative = vec![0u8; deriv_len];
    for i in (1..locator.len()).step_by(2) {
        derivative[i - 1] = locator[i];
    }

    let mut magnitudes = Vec::with_capacity(positions.len());
    for &(gf_pos, _) in positions {
        let x = if gf_pos == 0 { 1 } else { gf256::alpha_pow(gf_pos) };
        let x_inv = gf256::alpha_pow_neg(gf_pos);

        let omega_val = gf256::eval_asc(&omega, x_inv);
        let deriv_val = gf256::eval_asc(&derivative, x_inv);

        if deriv_val == 0 {
            magnitudes.push(0);
            continue;
        }

        // FCR = 0: e = X_l * Omega(X_l^-1) / sigma'(X_l^-1)
        magnitudes.push(gf256::mul(
            x,
            gf256::mul(omega_val, gf256::inv(deriv_val)),
        ));
    }

    magnitudes
}

/// Decode one received block of `data_len + parity` bytes.
///
/// Returns the corrected data together with the number of symbol errors
/// repaired, or [`MeowError::EccFailure`] when the corruption exceeds
/// `parity / 2` symbols or lands in the virtual padding of a shortened code.
pub(crate) fn decode_block(received: &[u8], data_len: usize, parity: usize) -> Result<(Vec<u8>, usize)> {
    let codeword_len = data_len + parity;
    if received.len() != codeword_len || codeword_len > BLOCK_LEN {
        return Err(MeowError::EccFailure);
    }

    // Shortened codes are zero-padded at the front to the full block length
    let padding = BLOCK_LEN - codeword_len;
    let mut block = vec![0u8; BLOCK_LEN];
    block[padding..].copy_from_slice(received);

    let syn = syndromes(&block, parity);
    if syn.iter().all(|&s| s == 0) {
        return Ok((received[..data_len].to_vec(), 0));
    }

    let locator = error_locator(&syn);
    let num_errors = locator.len() - 1;
    if num_errors > parity / 2 {
        return Err(MeowError::EccFailure);
    }

    let positions = find_error_positions(&locator).ok_or(MeowError::EccFailure)?;
    let magnitudes = error_magnitudes(&locator, &syn, &positions);

    for (&(_, array_pos), &magnitude) in positions.iter().zip(magnitudes.iter()) {
        if array_pos < padding {
            // an error in the virtual padding means the locator is bogus
            return Err(MeowError::EccFailure);
        }
        block[array_pos] = gf256::add(block[array_pos], magnitude);
    }

    // A decode only counts when the repaired block is a true codeword
    if syndromes(&block, parity).iter().any(|&s| s != 0) {
        return Err(MeowError::EccFailure);
    }

    Ok((block[padding..padding + data_len].to_vec(), num_errors))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + 13) as u8).collect()
    }

    #[test]
    fn clean_block_round_trips() {
        for parity in [16usize, 32, 64] {
            let data = sample_data(100);
            let codeword = encode_block(&data, parity);
            assert_eq!(codeword.len(), data.len() + parity);

            let (decoded, corrected) = decode_block(&codeword, data.len(), parity).unwrap();
            assert_eq!(decoded, data);
            assert_eq!(corrected, 0);
        }
    }

    #[test]
    fn corrects_up_to_half_the_parity_symbols() {
        for parity in [16usize, 32, 64] {
            let t = parity / 2;
            let data = sample_data(120);
            let mut codeword = encode_block(&data, parity);

            for i in 0..t {
                codeword[i * 2] ^= 0xA5;
            }

            let (decoded, corrected) = decode_block(&codeword, data.len(), parity).unwrap();
            assert_eq!(decoded, data, "parity {parity}");
            assert_eq!(corrected, t);
        }
    }

    #[test]
    fn rejects_one_error_beyond_the_bound() {
        for parity in [16usize, 32] {
            let t = parity / 2;
            let data = sample_data(120);
            let mut codeword = encode_block(&data, parity);

            for i in 0..=t {
                codeword[i * 2] ^= 0xA5;
            }

            assert!(decode_block(&codeword, data.len(), parity).is_err());
        }
    }

    #[test]
    fn corrects_errors_in_the_parity_region() {
        let data = sample_data(50);
        let mut codeword = encode_block(&data, 32);

        codeword[55] ^= 0xFF;
        codeword[60] ^= 0x01;

        let (decoded, corrected) = decode_block(&codeword, data.len(), 32).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(corrected, 2);
    }

    #[test]
    fn handles_a_full_length_block() {
        let data = sample_data(BLOCK_LEN - 64);
        let mut codeword = encode_block(&data, 64);
        assert_eq!(codeword.len(), BLOCK_LEN);

        for pos in [0usize, 63, 127, 254] {
            codeword[pos] ^= 0x42;
        }

        let (decoded, corrected) = decode_block(&codeword, data.len(), 64).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(corrected, 4);
    }

    #[test]
    fn handles_a_one_byte_shortened_block() {
        let data = [0xCDu8];
        let mut codeword = encode_block(&data, 16);
        assert_eq!(codeword.len(), 17);

        codeword[0] ^= 0x03;

        let (decoded, corrected) = decode_block(&codeword, 1, 16).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(corrected, 1);
    }

    #[test]
    fn rejects_truncated_input() {
        let data = sample_data(40);
        let codeword = encode_block(&data, 16);
        assert!(decode_block(&codeword[..codeword.len() - 1], data.len(), 16).is_err());
    }
}
