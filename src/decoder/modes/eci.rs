/// ECI designator decoder (Mode 0111)
use super::reader::BitReader;
use crate::models::EciAssignment;

/// Read an ECI assignment number: a `0` prefix means 7 bits follow, `10`
/// means 14, `110` means 21. A `111` prefix is recorded as corrupted.
pub fn read_assignment(reader: &mut BitReader) -> Option<EciAssignment> {
    if reader.read_bits(1)? == 0 {
        return Some(EciAssignment::Number(reader.read_bits(7)?));
    }
    if reader.read_bits(1)? == 0 {
        return Some(EciAssignment::Number(reader.read_bits(14)?));
    }
    if reader.read_bits(1)? == 0 {
        return Some(EciAssignment::Number(reader.read_bits(21)?));
    }
    Some(EciAssignment::Corrupted)
}
