use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::rc::Rc;
use tactile_core::{ManualClock, Point};
use tactile_foundation::{
    GestureEngine, GestureProvider, InputEvent, InputEventType, TargetId, TouchPoint,
};

const TARGET: TargetId = 1;
const MOVES_PER_FRAME_SAMPLES: &[usize] = &[1, 4, 16];
const FRAMES: usize = 60;

struct MoveFixture {
    engine: GestureEngine,
    clock: ManualClock,
    moves: Vec<InputEvent>,
}

impl MoveFixture {
    fn new(moves_per_frame: usize) -> Self {
        let clock = ManualClock::new();
        let engine = GestureProvider::new()
            .with_clock(Rc::new(clock.clone()))
            .build()
            .expect("built-in gestures");

        let moves = (0..FRAMES * moves_per_frame)
            .map(|step| {
                let x = step as f32 * 0.75;
                InputEvent::new(InputEventType::TouchMove, TARGET, Point::ZERO)
                    .with_touches(&[TouchPoint::new(0, Point::new(x, 0.0))])
            })
            .collect();

        Self {
            engine,
            clock,
            moves,
        }
    }

    /// One full horizontal drag, pumping a frame after every `moves_per_frame` moves.
    fn run(&mut self, moves_per_frame: usize) {
        self.engine
            .handle_event(&touch(InputEventType::TouchStart, 0.0));
        for (index, event) in self.moves.iter().enumerate() {
            self.clock.advance(1);
            self.engine.handle_event(event);
            if (index + 1) % moves_per_frame == 0 {
                self.engine.frame_clock().drain_frame(self.clock.now_millis());
            }
        }
        let end_x = self.moves.last().map_or(0.0, |event| event.point().x);
        self.engine
            .handle_event(&touch(InputEventType::TouchEnd, end_x));
        // Keep every interaction same-kind so the suppression window never applies.
        self.clock.advance(1);
    }
}

fn touch(event_type: InputEventType, x: f32) -> InputEvent {
    let contact = [TouchPoint::new(0, Point::new(x, 0.0))];
    let event = InputEvent::new(event_type, TARGET, Point::ZERO);
    if event_type == InputEventType::TouchEnd {
        event.with_changed_touches(&contact)
    } else {
        event.with_touches(&contact)
    }
}

fn bench_drag_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_path_drag");
    for &moves_per_frame in MOVES_PER_FRAME_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("moves_per_frame", moves_per_frame),
            &moves_per_frame,
            |b, &moves_per_frame| {
                let mut fixture = MoveFixture::new(moves_per_frame);
                b.iter(|| {
                    fixture.run(moves_per_frame);
                    black_box(fixture.engine.last_pointer().copied());
                });
            },
        );
    }
    group.finish();
}

fn bench_guarded_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_path_guarded");
    for &moves_per_frame in MOVES_PER_FRAME_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("moves_per_frame", moves_per_frame),
            &moves_per_frame,
            |b, &moves_per_frame| {
                let mut fixture = MoveFixture::new(moves_per_frame);
                let _guard = fixture.engine.register(TARGET, "drag swipe");
                b.iter(|| {
                    fixture.run(moves_per_frame);
                    black_box(fixture.engine.last_pointer().copied());
                });
            },
        );
    }
    group.finish();
}

criterion_group!(move_path, bench_drag_moves, bench_guarded_moves);
criterion_main!(move_path);
