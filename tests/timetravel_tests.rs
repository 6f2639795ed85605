// Integration tests for pause/step control, reverse execution, the
// throttle, and mid-run reloads

use tapetty::interpreter::engine::Engine;
use tapetty::program::SourcePosition;

fn prepared(lines: &[&str], slowdown: u32) -> Engine {
    let mut engine = Engine::new(slowdown);
    engine.load(lines.iter().copied());
    engine.prepare().expect("program should prepare");
    engine
}

#[test]
fn paused_ticks_are_recorded_but_do_nothing() {
    let mut engine = prepared(&["+++"], 1);
    engine.pause();

    for _ in 0..10 {
        assert!(engine.tick().is_none());
    }

    assert_eq!(engine.ticks_received(), 10);
    assert_eq!(engine.steps_taken(), 0);
    assert_eq!(engine.cursor(), Some(SourcePosition::new(0, 0)));

    // Resuming picks up where the throttle left off, unshifted by the
    // paused ticks.
    engine.resume();
    assert!(engine.tick().is_some());
    assert_eq!(engine.steps_taken(), 1);
}

#[test]
fn manual_steps_bypass_the_throttle_while_paused() {
    let mut engine = prepared(&["++."], 50);
    engine.pause();

    assert!(!engine.step_forward().halted);
    assert!(!engine.step_forward().halted);
    assert_eq!(engine.steps_taken(), 2);
    assert_eq!(engine.cells(1), &[2]);
}

#[test]
fn step_backward_restores_output_tape_and_cursor() {
    let mut engine = prepared(&["+.+."], 1);

    engine.step(); // +
    engine.step(); // .
    engine.step(); // +
    assert_eq!(engine.output(), &[1]);
    assert_eq!(engine.cells(1), &[2]);

    assert!(engine.step_backward());
    assert_eq!(engine.cells(1), &[1]);
    assert_eq!(engine.cursor(), Some(SourcePosition::new(0, 2)));

    assert!(engine.step_backward());
    assert_eq!(engine.output(), &[] as &[u8]);
    assert_eq!(engine.cursor(), Some(SourcePosition::new(0, 1)));
}

#[test]
fn back_n_then_forward_n_round_trips() {
    let mut engine = prepared(&["++[>+<-]>."], 1);

    for _ in 0..8 {
        engine.step();
    }
    let cursor = engine.cursor();
    let output = engine.output().to_vec();
    let cells = engine.cells(8).to_vec();
    let pointer = engine.cell_pointer();

    for n in 1..=8 {
        for _ in 0..n {
            assert!(engine.step_backward());
        }
        for _ in 0..n {
            engine.step_forward();
        }
        assert_eq!(engine.cursor(), cursor);
        assert_eq!(engine.output(), output);
        assert_eq!(engine.cells(8), cells);
        assert_eq!(engine.cell_pointer(), pointer);
    }
}

#[test]
fn stepping_back_past_the_start_reports_false() {
    let mut engine = prepared(&["+"], 1);

    assert!(!engine.step_backward());

    engine.step();
    assert!(engine.step_backward());
    assert!(!engine.step_backward());
    assert_eq!(engine.cursor(), Some(SourcePosition::new(0, 0)));
    assert_eq!(engine.steps_taken(), 0);
}

#[test]
fn rewound_halt_is_reachable_again() {
    let mut engine = prepared(&["+."], 1);
    engine.step();
    engine.step();
    assert!(engine.step().halted);

    // Undo the final command, run forward again: same halt, same output.
    assert!(engine.step_backward());
    assert!(!engine.is_halted());
    assert!(!engine.step_forward().halted);
    assert!(engine.step().halted);
    assert_eq!(engine.output(), &[1]);
}

#[test]
fn one_in_f_ticks_is_live_outside_loops() {
    let mut engine = prepared(&["++++++++++"], 3);

    let mut live_ticks = Vec::new();
    for tick in 1..=30 {
        if engine.tick().is_some() {
            live_ticks.push(tick);
        }
    }

    assert_eq!(live_ticks, vec![3, 6, 9, 12, 15, 18, 21, 24, 27, 30]);
    assert_eq!(engine.steps_taken(), 10);
}

#[test]
fn every_tick_is_live_inside_a_loop_body() {
    let mut engine = prepared(&["+++[-]."], 5);

    let mut ticks_at_depth = 0;
    for _ in 0..200 {
        let before_depth = engine.loop_depth();
        let result = engine.tick();
        if before_depth > 0 {
            ticks_at_depth += 1;
            assert!(result.is_some(), "tick swallowed inside a loop body");
        }
        if engine.is_halted() {
            break;
        }
    }

    assert!(engine.is_halted());
    assert!(ticks_at_depth > 0);
}

#[test]
fn first_tick_after_loop_exit_is_live() {
    let mut engine = prepared(&["+[-]+"], 4);

    // Ticks 1-4: throttle window, `+` executes on tick 4.  Tick 8 enters
    // the loop, ticks 9-10 run the body at full rate and close the loop.
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.loop_depth(), 0);
    assert_eq!(engine.steps_taken(), 4);

    // The throttle was reset on loop exit: the very next tick runs the
    // trailing `+` instead of waiting out a fresh window.
    let result = engine.tick().expect("tick after loop exit must be live");
    assert_eq!(result.position, Some(SourcePosition::new(0, 4)));
    assert_eq!(engine.cells(1), &[1]);
}

#[test]
fn successful_rebuild_keeps_run_state() {
    let mut engine = prepared(&["++[-]."], 1);
    for _ in 0..4 {
        engine.step();
    }
    let cursor = engine.cursor();
    let cells = engine.cells(8).to_vec();

    // Mid-run edit that keeps the bracket structure valid.
    engine.load(["++[-]+."]);
    engine.rebuild_jumpmap().expect("edit is balanced");

    assert_eq!(engine.cursor(), cursor);
    assert_eq!(engine.cells(8), cells);

    while !engine.step().halted {}
    // The run finished against the edited program: the inserted `+`
    // executed before the output command.
    assert_eq!(engine.output(), &[1]);
}

#[test]
fn failed_rebuild_parks_the_engine_until_fixed() {
    let mut engine = prepared(&["+[-]"], 1);
    engine.step();
    engine.step();
    let cursor = engine.cursor();
    let steps_taken = engine.steps_taken();

    // A bracket typed but not yet closed.
    engine.load(["+[[-]"]);
    let err = engine.rebuild_jumpmap().expect_err("unbalanced edit");
    assert_eq!(err.position, SourcePosition::new(0, 1));

    // Parked: no ticks or steps run, no state is disturbed.
    assert!(engine.tick().is_none());
    assert!(engine.step().halted);
    assert_eq!(engine.cursor(), cursor);
    assert_eq!(engine.steps_taken(), steps_taken);

    // Closing the bracket revives the run where it stopped.
    engine.load(["+[-]"]);
    engine.rebuild_jumpmap().expect("balanced again");
    assert!(engine.syntax_error().is_none());
    while !engine.step().halted {}
    assert_eq!(engine.cells(1), &[0]);
}

#[test]
fn prepare_resets_everything() {
    let mut engine = prepared(&["+.>+."], 1);
    while !engine.step().halted {}
    assert_eq!(engine.output(), &[1, 1]);

    engine.prepare().expect("same program");

    assert_eq!(engine.cursor(), Some(SourcePosition::new(0, 0)));
    assert_eq!(engine.steps_taken(), 0);
    assert_eq!(engine.history_len(), 0);
    assert_eq!(engine.cell_pointer(), 0);
    assert!(engine.output().is_empty());
    assert_eq!(engine.loop_depth(), 0);

    while !engine.step().halted {}
    assert_eq!(engine.output(), &[1, 1]);
}

#[test]
fn history_capacity_bounds_backward_range() {
    let mut engine = Engine::with_history_capacity(1, 4);
    engine.load(["++++++++"]);
    engine.prepare().expect("program should prepare");

    for _ in 0..8 {
        engine.step();
    }
    assert_eq!(engine.history_len(), 4);

    let mut undone = 0;
    while engine.step_backward() {
        undone += 1;
    }
    // Only the four most recent steps can be undone.
    assert_eq!(undone, 4);
    assert_eq!(engine.cells(1), &[4]);
}
