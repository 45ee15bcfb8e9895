//! Packed binary layout for stamps.
//!
//! The encoding is recursive, with small tags distinguishing leaf and
//! node shapes and an adaptive-width integer for counters:
//!
//! ```text
//! id:     0          -> 00 0
//!         1          -> 00 1
//!         (0, i)     -> 01 enc(i)
//!         (i, 0)     -> 10 enc(i)
//!         (l, r)     -> 11 enc(l) enc(r)
//!
//! event:  n          -> 1 num(n, 2)
//!         (0, 0, r)  -> 0 00 enc(r)
//!         (0, l, 0)  -> 0 01 enc(l)
//!         (0, l, r)  -> 0 10 enc(l) enc(r)
//!         (n, 0, r)  -> 0 11 0 0 num(n, 2) enc(r)
//!         (n, l, 0)  -> 0 11 0 1 num(n, 2) enc(l)
//!         (n, l, r)  -> 0 11 1 num(n, 2) enc(l) enc(r)
//!
//! num(n, w):  n < 2^w -> 0 <w-bit n>
//!             else    -> 1 num(n - 2^w, w + 1)
//!
//! stamp:  enc(id) enc(event) <zero padding to a byte boundary>
//! ```
//!
//! A `0` child above is the zero leaf (`IdTree::Zero` / `Leaf(0)`). The
//! layout is a bijection between canonical trees and bit strings:
//! encoding length is O(nodes + counter bits), the seed stamp fits in
//! one byte, and decoding rejects every bit string the encoder cannot
//! produce - non-canonical trees as well as shadow encodings of
//! canonical ones (a zero child under a two-subtree tag, a zero base
//! counter under the counted tag).

use crate::bits::{BitReader, BitWriter};
use crate::error::{Result, WireError};
use treeclock_core::{EventTree, IdTree, Stamp};

/// Encode a stamp into its packed byte form.
pub fn encode(stamp: &Stamp) -> Vec<u8> {
    let mut writer = BitWriter::new();
    write_id(&mut writer, stamp.id());
    write_event(&mut writer, stamp.event_tree());
    writer.finish()
}

/// Decode a stamp from its packed byte form.
pub fn decode(bytes: &[u8]) -> Result<Stamp> {
    let mut reader = BitReader::new(bytes);
    let id = read_id(&mut reader)?;
    let event = read_event(&mut reader)?;
    reader.expect_padding()?;
    if !id.is_normal() || !event.is_normal() {
        return Err(WireError::NotCanonical);
    }
    Ok(Stamp::new(id, event))
}

/// Encode an identity tree alone.
pub fn encode_id(id: &IdTree) -> Vec<u8> {
    let mut writer = BitWriter::new();
    write_id(&mut writer, id);
    writer.finish()
}

/// Decode an identity tree alone.
pub fn decode_id(bytes: &[u8]) -> Result<IdTree> {
    let mut reader = BitReader::new(bytes);
    let id = read_id(&mut reader)?;
    reader.expect_padding()?;
    if !id.is_normal() {
        return Err(WireError::NotCanonical);
    }
    Ok(id)
}

/// Encode an event tree alone.
pub fn encode_event(event: &EventTree) -> Vec<u8> {
    let mut writer = BitWriter::new();
    write_event(&mut writer, event);
    writer.finish()
}

/// Decode an event tree alone.
pub fn decode_event(bytes: &[u8]) -> Result<EventTree> {
    let mut reader = BitReader::new(bytes);
    let event = read_event(&mut reader)?;
    reader.expect_padding()?;
    if !event.is_normal() {
        return Err(WireError::NotCanonical);
    }
    Ok(event)
}

fn write_id(writer: &mut BitWriter, id: &IdTree) {
    match id {
        IdTree::Zero => {
            writer.push(0, 2);
            writer.push(0, 1);
        }
        IdTree::One => {
            writer.push(0, 2);
            writer.push(1, 1);
        }
        IdTree::Node(l, r) if l.is_zero() => {
            writer.push(1, 2);
            write_id(writer, r);
        }
        IdTree::Node(l, r) if r.is_zero() => {
            writer.push(2, 2);
            write_id(writer, l);
        }
        IdTree::Node(l, r) => {
            writer.push(3, 2);
            write_id(writer, l);
            write_id(writer, r);
        }
    }
}

fn read_id(reader: &mut BitReader) -> Result<IdTree> {
    match reader.read(2)? {
        0 => Ok(if reader.read(1)? == 0 {
            IdTree::Zero
        } else {
            IdTree::One
        }),
        1 => Ok(IdTree::Node(
            Box::new(IdTree::Zero),
            Box::new(read_id(reader)?),
        )),
        2 => Ok(IdTree::Node(
            Box::new(read_id(reader)?),
            Box::new(IdTree::Zero),
        )),
        _ => {
            let l = read_id(reader)?;
            let r = read_id(reader)?;
            // A zero child has its own tag; accepting it here too would
            // give one tree two encodings.
            if l.is_zero() || r.is_zero() {
                return Err(WireError::NotCanonical);
            }
            Ok(IdTree::Node(Box::new(l), Box::new(r)))
        }
    }
}

fn write_event(writer: &mut BitWriter, event: &EventTree) {
    match event {
        EventTree::Leaf(n) => {
            writer.push(1, 1);
            write_num(writer, *n, 2);
        }
        EventTree::Node(n, l, r) => {
            writer.push(0, 1);
            let left_zero = matches!(l.as_ref(), EventTree::Leaf(0));
            let right_zero = matches!(r.as_ref(), EventTree::Leaf(0));
            match (*n, left_zero, right_zero) {
                (0, true, _) => {
                    writer.push(0, 2);
                    write_event(writer, r);
                }
                (0, _, true) => {
                    writer.push(1, 2);
                    write_event(writer, l);
                }
                (0, _, _) => {
                    writer.push(2, 2);
                    write_event(writer, l);
                    write_event(writer, r);
                }
                (_, true, _) => {
                    writer.push(3, 2);
                    writer.push(0, 1);
                    writer.push(0, 1);
                    write_num(writer, *n, 2);
                    write_event(writer, r);
                }
                (_, _, true) => {
                    writer.push(3, 2);
                    writer.push(0, 1);
                    writer.push(1, 1);
                    write_num(writer, *n, 2);
                    write_event(writer, l);
                }
                (_, _, _) => {
                    writer.push(3, 2);
                    writer.push(1, 1);
                    write_num(writer, *n, 2);
                    write_event(writer, l);
                    write_event(writer, r);
                }
            }
        }
    }
}

fn read_event(reader: &mut BitReader) -> Result<EventTree> {
    let zero = || Box::new(EventTree::Leaf(0));
    if reader.read(1)? == 1 {
        return Ok(EventTree::Leaf(read_num(reader, 2)?));
    }
    let is_zero_leaf = |e: &EventTree| matches!(e, EventTree::Leaf(0));
    match reader.read(2)? {
        0 => Ok(EventTree::Node(0, zero(), Box::new(read_event(reader)?))),
        1 => Ok(EventTree::Node(0, Box::new(read_event(reader)?), zero())),
        2 => {
            let l = read_event(reader)?;
            let r = read_event(reader)?;
            // Zero-leaf children belong to subtags 0 and 1; accepting
            // them here too would give one tree two encodings.
            if is_zero_leaf(&l) || is_zero_leaf(&r) {
                return Err(WireError::NotCanonical);
            }
            Ok(EventTree::Node(0, Box::new(l), Box::new(r)))
        }
        _ => {
            // Subtag 3 carries a nonzero base counter; zero bases belong
            // to subtags 0-2.
            if reader.read(1)? == 0 {
                let right_keeps = reader.read(1)? == 0;
                let n = read_num(reader, 2)?;
                let child = read_event(reader)?;
                if n == 0 {
                    return Err(WireError::NotCanonical);
                }
                Ok(if right_keeps {
                    EventTree::Node(n, zero(), Box::new(child))
                } else {
                    EventTree::Node(n, Box::new(child), zero())
                })
            } else {
                let n = read_num(reader, 2)?;
                let l = read_event(reader)?;
                let r = read_event(reader)?;
                if n == 0 || is_zero_leaf(&l) || is_zero_leaf(&r) {
                    return Err(WireError::NotCanonical);
                }
                Ok(EventTree::Node(n, Box::new(l), Box::new(r)))
            }
        }
    }
}

fn write_num(writer: &mut BitWriter, mut n: u64, mut width: u32) {
    // Widen until the remainder fits; every skipped width subtracts its
    // full range so the encoding stays bijective.
    loop {
        if width >= 64 || n < (1u64 << width) {
            writer.push(0, 1);
            writer.push(n, width);
            return;
        }
        writer.push(1, 1);
        n -= 1u64 << width;
        width += 1;
    }
}

fn read_num(reader: &mut BitReader, start_width: u32) -> Result<u64> {
    let mut width = start_width;
    let mut base: u64 = 0;
    while reader.read(1)? == 1 {
        let range = 1u64.checked_shl(width).ok_or(WireError::CounterOverflow)?;
        base = base.checked_add(range).ok_or(WireError::CounterOverflow)?;
        width += 1;
    }
    let value = reader.read(width)?;
    base.checked_add(value).ok_or(WireError::CounterOverflow)
}
