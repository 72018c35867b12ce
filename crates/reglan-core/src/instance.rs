//! Components C, D, and E: the per-atom value generators, the per-alternative
//! odometer that is the hard part of this crate, and the round-robin branch
//! selector that ties them into one `Pattern` enumerator.
//!
//! None of this module touches a filesystem or blocks; `Atom::FileRef`
//! lines are already materialized by the parser by the time an instance is
//! built here.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{Alternative, Atom, Max, Pattern};

/// Capture table shared by every instance descending from the same root
/// `Pattern`: slot `k - 1` holds the most recent rendered value of capturing
/// group `k`, or `None` before it has rendered once. The one piece of
/// deliberately shared mutable state in this crate (see `SPEC_FULL.md` §9).
pub(crate) type Captures = Rc<RefCell<Vec<Option<String>>>>;

/// Component C: the shared behavior of every atom instance.
trait Gen {
    /// The string this instance currently renders.
    fn value(&self) -> String;
    /// Moves to the next value. Returns `true` if a next value exists.
    /// Returns `false` when the current value was the last one, in which
    /// case the instance has rewound to its first value (the odometer's
    /// carry signal to the instance at its left).
    fn advance(&mut self) -> bool;
    /// Rewinds to the first value without signaling a carry. Used when an
    /// atom's instance count shrinks and a surviving instance must restart
    /// clean.
    fn reset(&mut self);
}

/// A literal character. It has exactly one value and never advances.
struct LiteralInst(char);

impl Gen for LiteralInst {
    fn value(&self) -> String {
        self.0.to_string()
    }
    fn advance(&mut self) -> bool {
        false
    }
    fn reset(&mut self) {}
}

/// A fixed, ordered, non-empty set of string values: a resolved character
/// class (each member promoted to a one-character string) or the lines of a
/// `(?F<path>)` dictionary. Both reduce to the same odometer wheel.
struct ChoiceInst {
    values: Rc<Vec<String>>,
    idx: usize,
}

impl Gen for ChoiceInst {
    fn value(&self) -> String {
        self.values[self.idx].clone()
    }
    fn advance(&mut self) -> bool {
        if self.idx + 1 < self.values.len() {
            self.idx += 1;
            true
        } else {
            self.idx = 0;
            false
        }
    }
    fn reset(&mut self) {
        self.idx = 0;
    }
}

/// A parenthesized subpattern. Wraps a nested `PatternInstance` and, if
/// capturing, publishes its current rendered value into the shared capture
/// table every time it is read or advanced so a later `BackRefInst` always
/// sees the live value.
struct GroupInst {
    inner: PatternInstance,
    slot: Option<usize>,
    captures: Captures,
}

impl GroupInst {
    fn new(pattern: Rc<Pattern>, slot: Option<usize>, captures: Captures) -> Self {
        let inner = PatternInstance::new(pattern, Rc::clone(&captures));
        let inst = GroupInst {
            inner,
            slot,
            captures,
        };
        inst.publish();
        inst
    }

    fn publish(&self) {
        if let Some(index) = self.slot {
            self.captures.borrow_mut()[index - 1] = Some(self.inner.value());
        }
    }
}

impl Gen for GroupInst {
    fn value(&self) -> String {
        self.publish();
        self.inner.value()
    }
    fn advance(&mut self) -> bool {
        let advanced = self.inner.advance();
        self.publish();
        advanced
    }
    fn reset(&mut self) {
        self.inner.reset();
        self.publish();
    }
}

/// `\1`-`\9`: echoes the live value of capturing group `k`. Never
/// participates in the odometer — a backreference has no choice of its own.
struct BackRefInst {
    k: usize,
    captures: Captures,
}

impl Gen for BackRefInst {
    fn value(&self) -> String {
        self.captures.borrow()[self.k - 1]
            .clone()
            .unwrap_or_default()
    }
    fn advance(&mut self) -> bool {
        false
    }
    fn reset(&mut self) {}
}

fn new_instance(atom: &Atom, captures: Captures) -> Box<dyn Gen> {
    match atom {
        Atom::Literal(c) => Box::new(LiteralInst(*c)),
        Atom::Class(class) => {
            let values = class.chars().into_iter().map(String::from).collect();
            Box::new(ChoiceInst {
                values: Rc::new(values),
                idx: 0,
            })
        }
        Atom::FileRef(lines) => Box::new(ChoiceInst {
            values: Rc::clone(lines),
            idx: 0,
        }),
        Atom::Group(pattern, slot) => {
            Box::new(GroupInst::new(Rc::clone(pattern), *slot, captures))
        }
        Atom::BackRef(k) => Box::new(BackRefInst { k: *k, captures }),
    }
}

/// Wheel 2's shape successor (`_next_seq_with_sum` in the prototype): the
/// next composition of `maxs.len()` nonnegative slots with the same sum as
/// `seq`, in "decrease-leftmost, carry-right" order. `None` when `seq` was
/// already the last shape of that sum.
///
/// This works by repeatedly doing the equivalent of "+1 to the whole
/// sequence with carry from the left", stopping as soon as the sum returns
/// to its starting value — carrying past a slot resets it to zero, which is
/// exactly what walks the leftmost slot back down while pushing the
/// remainder rightward.
fn next_seq_with_sum(seq: &[u64], maxs: &[u64]) -> Option<Vec<u64>> {
    let mut seq = seq.to_vec();
    let need_s: u64 = seq.iter().sum();
    let mut s = need_s;
    loop {
        let mut inced = false;
        for i in 0..seq.len() {
            if seq[i] < maxs[i] {
                seq[i] += 1;
                s += 1;
                inced = true;
                break;
            } else {
                s -= seq[i];
                seq[i] = 0;
            }
        }
        if !inced {
            return None;
        }
        if s == need_s {
            return Some(seq);
        }
    }
}

/// Wheel 3's initial-shape fill (`_fill_seq_with_sum`): greedily packs
/// `need` units of surplus into the leftmost slots that can absorb it,
/// subject to the per-slot caps in `maxs`. `None` if `maxs` cannot absorb
/// `need` at all.
fn fill_seq_with_sum(mut need: u64, maxs: &[u64]) -> Option<Vec<u64>> {
    let mut seq = vec![0u64; maxs.len()];
    for i in 0..seq.len() {
        let d = need.min(maxs[i]);
        seq[i] = d;
        need -= d;
        if need == 0 {
            return Some(seq);
        }
    }
    None
}

/// Component D: the three-wheel odometer over one `|`-branch's concatenated,
/// quantified atoms. Visits every string of the branch's language exactly
/// once, in total-length-ascending order.
pub(crate) struct AlternativeInstance {
    atoms: Rc<Alternative>,
    captures: Captures,
    min_length: u64,
    max_length: Max,
    length: u64,
    /// `added[i]` is the surplus repeat count atom `i` currently carries
    /// above its own minimum; `added.len() == atoms.atoms.len()`.
    added: Vec<u64>,
    /// `max_added[i]` caps `added[i]` for the current `length` (recomputed
    /// by `set_length`, since an unbounded atom's effective cap depends on
    /// the total length being targeted).
    max_added: Vec<u64>,
    /// `slots[i]` holds exactly `atoms.atoms[i].min + added[i]` live
    /// instances of atom `i`, each independently walking its own values.
    slots: Vec<Vec<Box<dyn Gen>>>,
}

impl AlternativeInstance {
    pub(crate) fn new(atoms: Rc<Alternative>, captures: Captures) -> Self {
        let min_length = atoms.min_length();
        let max_length = atoms.max_length();
        let mut inst = AlternativeInstance {
            atoms,
            captures,
            min_length,
            max_length,
            length: 0,
            added: Vec::new(),
            max_added: Vec::new(),
            slots: Vec::new(),
        };
        let built = inst.set_length(min_length);
        debug_assert!(built, "an alternative must always be constructible at its minimum length");
        inst
    }

    fn effective_max(&self, length: u64, i: usize) -> u64 {
        let qa = &self.atoms.atoms[i];
        match qa.max {
            Max::Bounded(m) => m as u64,
            Max::Unbounded => length - self.min_length + qa.min as u64,
        }
    }

    /// Wheel 3: rebuilds the whole shape (and every instance) for a brand
    /// new total `length`, greedy-filling the surplus `length - min_length`
    /// into the leftmost atoms that can take it. Returns `false` if no
    /// shape of that length exists (the atom caps can't reach it).
    fn set_length(&mut self, length: u64) -> bool {
        let global_max = length - self.min_length;
        let n = self.atoms.atoms.len();
        let max_added: Vec<u64> = (0..n)
            .map(|i| self.effective_max(length, i) - self.atoms.atoms[i].min as u64)
            .collect();
        let added = match fill_seq_with_sum(global_max, &max_added) {
            Some(a) => a,
            None => return false,
        };
        self.max_added = max_added;
        self.rebuild(added);
        self.length == length
    }

    /// Allocates fresh instances for a shape, recomputing `self.length`.
    fn rebuild(&mut self, added: Vec<u64>) {
        let mut slots = Vec::with_capacity(added.len());
        let mut total = 0u64;
        for (i, qa) in self.atoms.atoms.iter().enumerate() {
            let count = qa.min as u64 + added[i];
            total += count;
            let mut instances = Vec::with_capacity(count as usize);
            for _ in 0..count {
                instances.push(new_instance(&qa.atom, Rc::clone(&self.captures)));
            }
            slots.push(instances);
        }
        self.added = added;
        self.slots = slots;
        self.length = total;
    }

    /// Wheel 2: moves to the next shape with the same total `length`,
    /// resizing each atom's instance list to match (fresh instances reset
    /// to their first value; surplus instances are dropped). Returns
    /// `false` once every shape of this length has been visited.
    fn inc_counts(&mut self) -> bool {
        let next = match next_seq_with_sum(&self.added, &self.max_added) {
            Some(a) => a,
            None => return false,
        };
        for (i, qa) in self.atoms.atoms.iter().enumerate() {
            let count = qa.min as u64 + next[i];
            let instances = &mut self.slots[i];
            while instances.len() as u64 > count {
                instances.pop();
            }
            while (instances.len() as u64) < count {
                instances.push(new_instance(&qa.atom, Rc::clone(&self.captures)));
            }
        }
        self.added = next;
        true
    }

    /// Wheel 1: odometer step across every live instance. The prototype's
    /// `endian=False` default scans the last atom first and, within an
    /// atom, its last instance first — a stable direction, kept here rather
    /// than exposed as a flag (spec.md §9 treats the choice as
    /// implementation-defined).
    fn inc_values(&mut self) -> bool {
        for instances in self.slots.iter_mut().rev() {
            for inst in instances.iter_mut().rev() {
                if inst.advance() {
                    return true;
                }
                inst.reset();
            }
        }
        false
    }

    /// Advances to the next string of this alternative's language. Returns
    /// `false` once exhausted, in which case the instance has already
    /// rewound to its minimum-length first string.
    pub(crate) fn advance(&mut self) -> bool {
        if self.inc_values() {
            return true;
        }
        if self.inc_counts() {
            return true;
        }
        let can_grow = match self.max_length {
            Max::Unbounded => true,
            Max::Bounded(m) => self.length < m as u64,
        };
        if can_grow && self.set_length(self.length + 1) {
            return true;
        }
        self.set_length(self.min_length);
        false
    }

    pub(crate) fn value(&self) -> String {
        let mut out = String::new();
        for instances in &self.slots {
            for inst in instances {
                out.push_str(&inst.value());
            }
        }
        out
    }
}

/// Component E: the top-level branch selector. Round-robins across live
/// alternatives, interleaving their languages; a branch is dropped once it
/// reports exhaustion, and the `Pattern` itself is exhausted once none
/// remain.
pub(crate) struct PatternInstance {
    alternatives: Vec<AlternativeInstance>,
    ptr: usize,
}

impl PatternInstance {
    pub(crate) fn new(pattern: Rc<Pattern>, captures: Captures) -> Self {
        let alternatives = pattern
            .alternatives
            .iter()
            .map(|alt| AlternativeInstance::new(Rc::clone(alt), Rc::clone(&captures)))
            .collect();
        PatternInstance {
            alternatives,
            ptr: 0,
        }
    }

    pub(crate) fn value(&self) -> String {
        self.alternatives[self.ptr].value()
    }

    /// Emits the branch at `ptr`, then moves `ptr` to the next branch; when
    /// it wraps, every live branch is asked to advance internally, and any
    /// branch that exhausts is dropped. Reports overall exhaustion once no
    /// branch remains.
    pub(crate) fn advance(&mut self) -> bool {
        self.ptr += 1;
        if self.ptr < self.alternatives.len() {
            return true;
        }
        self.ptr = 0;
        let mut i = 0;
        while i < self.alternatives.len() {
            if self.alternatives[i].advance() {
                i += 1;
            } else {
                self.alternatives.remove(i);
            }
        }
        !self.alternatives.is_empty()
    }
}
