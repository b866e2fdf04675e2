//! AFL fuzz harness for TombList
//!
//! Drives a TombList and a plain Vec with the same operations and checks
//! that they always agree. Small thresholds and growth increments make
//! reallocation and compaction happen often.

use afl::fuzz;
use tomblist::ListOptions;
use tomblist::TombList;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    Push(u8),
    Insert { pos: u8, value: u8 },
    RemoveAt { pos: u8 },
    RemoveValue(u8),
    Set { pos: u8, value: u8 },
    Clear,
    Sort,
    Reverse,
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 16;
        let rest = &bytes[1..];

        match op_type {
            0..=4 if !rest.is_empty() => Some((FuzzOp::Push(rest[0]), &rest[1..])),
            5 | 6 if rest.len() >= 2 => {
                let op = FuzzOp::Insert { pos: rest[0], value: rest[1] };
                Some((op, &rest[2..]))
            }
            7..=10 if !rest.is_empty() => Some((FuzzOp::RemoveAt { pos: rest[0] }, &rest[1..])),
            11 if !rest.is_empty() => Some((FuzzOp::RemoveValue(rest[0]), &rest[1..])),
            12 if rest.len() >= 2 => {
                let op = FuzzOp::Set { pos: rest[0], value: rest[1] };
                Some((op, &rest[2..]))
            }
            13 => Some((FuzzOp::Clear, rest)),
            14 => Some((FuzzOp::Sort, rest)),
            15 => Some((FuzzOp::Reverse, rest)),
            _ => None,
        }
    }
}

fn apply(list: &mut TombList<u8>, model: &mut Vec<u8>, op: FuzzOp) {
    let len = model.len();
    match op {
        FuzzOp::Push(value) => {
            list.push(value).unwrap();
            model.push(value);
        }
        FuzzOp::Insert { pos, value } => {
            let index = pos as usize % (len + 2);
            if index <= len {
                list.insert(index, value).unwrap();
                model.insert(index, value);
            } else {
                assert!(list.insert(index, value).is_err());
            }
        }
        FuzzOp::RemoveAt { pos } => {
            let index = pos as usize % (len + 1);
            if index < len {
                assert_eq!(list.remove_at(index).unwrap(), model.remove(index));
            } else {
                assert!(list.remove_at(index).is_err());
            }
        }
        FuzzOp::RemoveValue(value) => {
            let expected = model.iter().position(|v| *v == value);
            if let Some(index) = expected {
                model.remove(index);
            }
            assert_eq!(list.remove(&value).unwrap(), expected.is_some());
        }
        FuzzOp::Set { pos, value } => {
            if len == 0 {
                assert!(list.set(0, value).is_err());
                return;
            }
            let index = pos as usize % len;
            assert_eq!(list.set(index, value).unwrap(), model[index]);
            model[index] = value;
        }
        FuzzOp::Clear => {
            list.clear().unwrap();
            model.clear();
        }
        FuzzOp::Sort => {
            list.sort().unwrap();
            model.sort();
        }
        FuzzOp::Reverse => {
            list.reverse().unwrap();
            model.reverse();
        }
    }
}

fn main() {
    let options = ListOptions::new()
        .with_initial_capacity(2)
        .with_growth_increment(3)
        .with_compaction_threshold(4);

    fuzz!(|data: &[u8]| {
        let mut list: TombList<u8> = TombList::with_options(options.clone()).unwrap();
        let mut model: Vec<u8> = Vec::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            apply(&mut list, &mut model, op);
            remaining = rest;

            assert_eq!(list.len(), model.len());
            assert!(list.len() <= list.capacity());
            assert!(list.pending_removals() < list.compaction_threshold());
        }

        assert_eq!(list.to_vec(), model);
        let walked: Vec<u8> = list.iter().copied().collect();
        assert_eq!(walked, model);
    });
}
