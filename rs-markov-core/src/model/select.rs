use std::collections::BTreeMap;

use rand::RngCore;

/// Maps a raw 32-bit random value onto an index in `0..len`.
///
/// The raw value is scaled linearly onto `[-0.5, len - 0.5]`, rounded to
/// the nearest integer and clamped, so every index covers the same share of
/// the raw range. The same raw value always yields the same index.
///
/// Returns 0 when `len <= 1`.
pub fn scale_to_index(raw: u32, len: usize) -> usize {
	if len <= 1 {
		return 0;
	}
	let position = f64::from(raw) / f64::from(u32::MAX) * len as f64 - 0.5;
	let index = position.round();
	if index <= 0.0 {
		0
	} else if index >= (len - 1) as f64 {
		len - 1
	} else {
		index as usize
	}
}

/// Picks a uniformly random element of `items`.
///
/// Draws exactly one raw value from `rng` when `items` is not empty.
/// Returns `None` for an empty slice.
pub fn pick_uniform<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
	R: RngCore + ?Sized,
{
	if items.is_empty() {
		return None;
	}
	items.get(scale_to_index(rng.next_u32(), items.len()))
}

/// Picks a uniformly random entry of `map`.
///
/// Every entry has the same probability; callers must not rely on which
/// entry a given raw value lands on. Returns `None` for an empty map.
pub fn pick_uniform_keyed<'a, K, V, R>(map: &'a BTreeMap<K, V>, rng: &mut R) -> Option<(&'a K, &'a V)>
where
	R: RngCore + ?Sized,
{
	if map.is_empty() {
		return None;
	}
	let index = scale_to_index(rng.next_u32(), map.len());
	map.iter().nth(index)
}

/// Random sources returning scripted raw values, for tests.
#[cfg(test)]
pub(crate) mod testing {
	use rand::RngCore;

	/// Returns the same raw value forever.
	pub(crate) struct FixedRng(pub u32);

	impl RngCore for FixedRng {
		fn next_u32(&mut self) -> u32 {
			self.0
		}

		fn next_u64(&mut self) -> u64 {
			u64::from(self.0)
		}

		fn fill_bytes(&mut self, dst: &mut [u8]) {
			dst.fill(0);
		}
	}
}
