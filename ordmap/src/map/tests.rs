/*
 * Created on Sun Oct 18 2026
 *
 * This file is a part of Skytable
 * Skytable (formerly known as TerrabaseDB or Skybase) is a free and open-source
 * NoSQL database written by Sayan Nandan ("the Author") with the
 * vision to provide flexibility in data modelling without compromising
 * on performance, queryability or scalability.
 *
 * Copyright (c) 2026, Sayan Nandan <ohsayan@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

use {
    super::OrderedMap,
    crate::{
        error::Error,
        test_utils::{init_log, random_number, random_string},
        Filter, OrderedMapCns, TravelMode,
    },
    core::ops::ControlFlow,
    std::{collections::HashMap, sync::Arc, thread},
};

#[cfg(not(miri))]
const SPAM_CNT: usize = 16_384;
#[cfg(miri)]
const SPAM_CNT: usize = 128;

#[cfg(not(miri))]
const THREAD_CNT: usize = 8;
#[cfg(miri)]
const THREAD_CNT: usize = 2;

type Map = OrderedMap<String, usize>;

/// Returns a map with: `"{i}" -> i` starting from 0 upto the value of [`SPAM_CNT`]
fn mkmap() -> Map {
    let m = Map::with_capacity(SPAM_CNT);
    for int in 0..SPAM_CNT {
        m.store(int.to_string(), int);
    }
    assert_eq!(m.len(), SPAM_CNT);
    m
}

fn forward(m: &Map) -> Vec<usize> {
    m.slice(TravelMode::Forward, &[])
}

fn reverse(m: &Map) -> Vec<usize> {
    m.slice(TravelMode::Reverse, &[])
}

/// Count the entries reachable by walking cursors front to back
fn walk_len<K: crate::AsKeyClone, V: Clone>(m: &OrderedMap<K, V>) -> usize {
    let mut n = 0;
    let mut cur = m.front();
    while let Some(item) = cur {
        n += 1;
        cur = item.next().unwrap();
    }
    n
}

/*
    basic ops
*/

#[test]
fn empty() {
    let m = Map::new();
    assert!(m.is_empty());
    assert_eq!(m.load("x"), None);
    assert!(!m.has("x"));
    assert!(m.front().is_none());
    assert!(m.back().is_none());
    assert!(forward(&m).is_empty());
}

#[test]
fn simple_crud() {
    let m = Map::new();
    m.store("hello".to_owned(), 1);
    assert_eq!(m.load("hello"), Some(1));
    assert!(m.has("hello"));
    m.store("hello".to_owned(), 2);
    assert_eq!(m.load("hello"), Some(2));
    assert_eq!(m.len(), 1);
    assert_eq!(m.remove("hello"), Some(2));
    assert_eq!(m.remove("hello"), None);
    assert!(m.is_empty());
}

#[test]
fn load_with_borrows() {
    let m = OrderedMap::<&str, Vec<u8>>::new();
    m.store("bytes", vec![1, 2, 3]);
    assert_eq!(m.load_with("bytes", |v| v.len()), Some(3));
    assert_eq!(m.load_with("nope", |v| v.len()), None);
}

#[test]
fn chained() {
    let m = OrderedMap::new();
    m.store("a", 1).store("b", 2).delete(&"a").store("c", 3);
    assert_eq!(m.slice(TravelMode::Forward, &[]), vec![2, 3]);
}

/*
    ordering
*/

#[test]
fn order_preserved() {
    let m = mkmap();
    assert_eq!(forward(&m), (0..SPAM_CNT).collect::<Vec<_>>());
    assert_eq!(reverse(&m), (0..SPAM_CNT).rev().collect::<Vec<_>>());
}

#[test]
fn update_in_place() {
    let m = OrderedMap::new();
    m.store("a", 1).store("b", 2).store("c", 3);
    m.store("b", 20).store("a", 10);
    assert_eq!(m.keys(TravelMode::Forward, &[]), vec!["a", "b", "c"]);
    assert_eq!(m.slice(TravelMode::Forward, &[]), vec![10, 20, 3]);
}

#[test]
fn delete_then_store_goes_to_back() {
    let m = OrderedMap::new();
    m.store("a", 1).store("b", 2).store("c", 3);
    m.delete(&"a").store("a", 4);
    assert_eq!(m.keys(TravelMode::Forward, &[]), vec!["b", "c", "a"]);
}

#[test]
fn delete_nx_is_noop() {
    let m = mkmap();
    let before = forward(&m);
    for int in SPAM_CNT..SPAM_CNT * 2 {
        m.delete(int.to_string().as_str());
    }
    assert_eq!(m.len(), SPAM_CNT);
    assert_eq!(forward(&m), before);
}

#[test]
fn bijection_after_churn() {
    let mut rng = rand::thread_rng();
    let m = Map::new();
    let mut model = HashMap::new();
    for _ in 0..SPAM_CNT {
        let k = random_number(0usize, 512, &mut rng);
        if random_number(0u8, 3, &mut rng) == 0 {
            m.delete(k.to_string().as_str());
            model.remove(&k);
        } else {
            m.store(k.to_string(), k);
            model.insert(k, k);
        }
    }
    assert_eq!(m.len(), model.len());
    assert_eq!(walk_len(&m), model.len());
    assert_eq!(forward(&m).len(), model.len());
    for (k, v) in model {
        assert_eq!(m.load(k.to_string().as_str()), Some(v));
    }
}

/*
    load or store
*/

#[test]
fn load_or_store() {
    let m = OrderedMap::new();
    assert_eq!(m.load_or_store("a", 1), (1, false));
    assert_eq!(m.load_or_store("a", 2), (1, true));
    assert_eq!(m.load("a"), Some(1));
    assert_eq!(m.len(), 1);
}

#[test]
fn load_or_store_race() {
    init_log();
    for _ in 0..64 {
        let m = Arc::new(OrderedMap::<&str, usize>::new());
        let handles: Vec<_> = (0..THREAD_CNT)
            .map(|tid| {
                let m = m.clone();
                thread::spawn(move || m.load_or_store("shared", tid))
            })
            .collect();
        let results: Vec<(usize, bool)> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|(_, loaded)| !loaded).count(), 1);
        let winner = results[0].0;
        assert!(results.iter().all(|(v, _)| *v == winner));
        assert_eq!(m.load("shared"), Some(winner));
        assert_eq!(m.len(), 1);
    }
}

/*
    traversal
*/

fn gt1(_: usize, _: &&str, v: &i32) -> bool {
    *v > 1
}

fn lt5(_: usize, _: &&str, v: &i32) -> bool {
    *v < 5
}

fn one_to_five() -> OrderedMap<&'static str, i32> {
    let m = OrderedMap::new();
    m.store("a", 1)
        .store("b", 2)
        .store("c", 3)
        .store("d", 4)
        .store("e", 5);
    m
}

#[test]
fn filters_and() {
    let m = one_to_five();
    assert_eq!(m.slice(TravelMode::Forward, &[&gt1, &lt5]), vec![2, 3, 4]);
    assert_eq!(m.slice(TravelMode::Reverse, &[&gt1, &lt5]), vec![4, 3, 2]);
    assert_eq!(m.keys(TravelMode::Forward, &[&gt1, &lt5]), vec!["b", "c", "d"]);
}

#[test]
fn filters_short_circuit() {
    let m = one_to_five();
    let calls = std::cell::Cell::new(0);
    let counting = |_: usize, _: &&str, _: &i32| {
        calls.set(calls.get() + 1);
        true
    };
    let filters: [Filter<'_, &str, i32>; 2] = [&gt1, &counting];
    assert_eq!(m.slice(TravelMode::Forward, &filters), vec![2, 3, 4, 5]);
    // the rejected entry never reaches the second filter
    assert_eq!(calls.get(), 4);
}

#[test]
fn position_counts_rejected() {
    let m = one_to_five();
    let mut seen = vec![];
    m.travel_forward(
        |pos, _, v| {
            seen.push((pos, *v));
            ControlFlow::Continue(())
        },
        &[&gt1, &lt5],
    );
    assert_eq!(seen, vec![(1, 2), (2, 3), (3, 4)]);
    let mut seen = vec![];
    m.travel_reverse(
        |pos, k, _| {
            seen.push((pos, *k));
            ControlFlow::Continue(())
        },
        &[],
    );
    assert_eq!(
        seen,
        vec![(0, "e"), (1, "d"), (2, "c"), (3, "b"), (4, "a")]
    );
}

#[test]
fn early_exit() {
    let m = mkmap();
    let mut seen = vec![];
    m.travel(
        TravelMode::Forward,
        |pos, _, v| {
            seen.push(*v);
            if pos == 9 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        },
        &[],
    );
    assert_eq!(seen, (0..10).collect::<Vec<_>>());
}

#[test]
fn reentrant_read_in_visitor() {
    let m = one_to_five();
    let mut sums = vec![];
    m.travel_forward(
        |_, k, v| {
            // nested reads under the traversal's read lock
            assert!(m.has(k));
            sums.push(*v + m.len() as i32);
            ControlFlow::Continue(())
        },
        &[],
    );
    assert_eq!(sums, vec![6, 7, 8, 9, 10]);
}

/*
    cursors
*/

#[test]
fn cursor_walk() {
    let m = one_to_five();
    let front = m.front().unwrap();
    assert_eq!((*front.key(), *front.value()), ("a", 1));
    assert!(front.prev().unwrap().is_none());
    let mut fwd = vec![];
    let mut cur = Some(front);
    while let Some(item) = cur {
        cur = item.next().unwrap();
        fwd.push(item.into_kv());
    }
    assert_eq!(fwd, vec![("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)]);
    let mut rev = vec![];
    let mut cur = m.back();
    while let Some(item) = cur {
        rev.push(*item.value());
        cur = item.prev().unwrap();
    }
    assert_eq!(rev, vec![5, 4, 3, 2, 1]);
}

#[test]
fn cursor_sees_interleaved_writes() {
    let m = one_to_five();
    let c = m.front().unwrap().next().unwrap().unwrap();
    assert_eq!(*c.key(), "b");
    m.delete(&"c").store("b", 200);
    // snapshot stays put, neighbours are live
    assert_eq!(*c.value(), 2);
    let d = c.next().unwrap().unwrap();
    assert_eq!(*d.key(), "d");
    let b = d.prev().unwrap().unwrap();
    assert_eq!(*b.value(), 200);
}

#[test]
fn cursor_stale_after_delete() {
    let m = one_to_five();
    let c = m.back().unwrap();
    m.delete(&"e");
    assert_eq!(c.prev().unwrap_err(), Error::InvalidHandle);
    // a new entry under the same key doesn't revive the cursor
    m.store("e", 50);
    assert_eq!(c.next().unwrap_err(), Error::InvalidHandle);
}

#[test]
fn cursor_stale_after_clear() {
    init_log();
    let m = one_to_five();
    let c = m.front().unwrap();
    m.clear();
    m.store("a", 1);
    assert_eq!(c.next().unwrap_err(), Error::InvalidHandle);
    assert_eq!(c.prev().unwrap_err(), Error::InvalidHandle);
    assert_ne!(m.front().unwrap().handle(), c.handle());
}

/*
    clear
*/

#[test]
fn clear() {
    init_log();
    let m = mkmap();
    m.clear();
    assert_eq!(m.len(), 0);
    assert!(forward(&m).is_empty());
    assert!(reverse(&m).is_empty());
    assert!(!m.has("0"));
    m.store("x".to_owned(), 1).store("y".to_owned(), 2);
    assert_eq!(forward(&m), vec![1, 2]);
    assert_eq!(walk_len(&m), 2);
}

#[test]
fn clear_conservative() {
    let m = OrderedMapCns::<u8, u8>::init();
    m.store(1u8, 1u8).store(2, 2);
    m.clear().store(3, 3);
    assert_eq!(m.slice(TravelMode::Forward, &[]), vec![3]);
}

#[test]
fn compact_keeps_order() {
    init_log();
    let m = mkmap();
    for int in (0..SPAM_CNT).filter(|i| i % 3 != 0) {
        m.delete(int.to_string().as_str());
    }
    m.compact();
    assert_eq!(
        forward(&m),
        (0..SPAM_CNT).filter(|i| i % 3 == 0).collect::<Vec<_>>()
    );
    m.store("new".to_owned(), usize::MAX);
    assert_eq!(reverse(&m)[0], usize::MAX);
}

/*
    misc impls
*/

#[test]
fn from_iter_clone_debug() {
    let m: OrderedMap<&str, i32> = [("b", 2), ("a", 1), ("b", 3)].into_iter().collect();
    assert_eq!(format!("{m:?}"), r#"{"b": 3, "a": 1}"#);
    let c = m.clone();
    m.store("c", 4);
    assert_eq!(c.len(), 2);
    assert_eq!(c.keys(TravelMode::Forward, &[]), vec!["b", "a"]);
    let mut e = c;
    e.extend([("z", 26)]);
    assert_eq!(e.keys(TravelMode::Reverse, &[]), vec!["z", "a", "b"]);
}

/*
    concurrency
*/

#[test]
fn concurrent_hammer() {
    init_log();
    let m = Arc::new(Map::new());
    // entries no thread touches
    let fixed: Vec<(String, usize)> = (0..64).map(|i| (format!("fixed-{i}"), i)).collect();
    fixed.iter().for_each(|(k, v)| {
        m.store(k.clone(), *v);
    });
    let handles: Vec<_> = (0..THREAD_CNT)
        .map(|tid| {
            let m = m.clone();
            thread::spawn(move || {
                let mut rng = rand::thread_rng();
                let mut live = HashMap::new();
                for _ in 0..SPAM_CNT / THREAD_CNT {
                    // every thread owns its own key space
                    let k = format!("t{tid}-{}", random_string(&mut rng, 2));
                    let v = random_number(0, usize::MAX, &mut rng);
                    match random_number(0u8, 3, &mut rng) {
                        0 => {
                            m.delete(k.as_str());
                            assert!(!m.has(k.as_str()));
                            live.remove(&k);
                        }
                        1 => {
                            assert_eq!(m.load(k.as_str()), live.get(&k).copied());
                        }
                        _ => {
                            m.store(k.clone(), v);
                            assert_eq!(m.load(k.as_str()), Some(v));
                            live.insert(k, v);
                        }
                    }
                }
                live
            })
        })
        .collect();
    // readers racing the writers
    for _ in 0..32 {
        let n = m.len();
        assert!(n >= fixed.len());
        for (k, v) in fixed.iter() {
            assert_eq!(m.load(k.as_str()), Some(*v));
        }
    }
    let mut expected = fixed.len();
    for h in handles {
        let live = h.join().unwrap();
        expected += live.len();
        for (k, v) in live {
            assert_eq!(m.load(k.as_str()), Some(v));
        }
    }
    assert_eq!(m.len(), expected);
    assert_eq!(walk_len(&m), expected);
    assert_eq!(forward(&m).len(), expected);
    // untouched keys kept their values and their place at the front
    assert_eq!(
        m.slice(TravelMode::Forward, &[])[..fixed.len()],
        (0..64).collect::<Vec<_>>()[..]
    );
}
