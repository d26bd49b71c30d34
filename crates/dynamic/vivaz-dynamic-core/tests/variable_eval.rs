use approx::assert_abs_diff_eq;
use vivaz_dynamic_core::{
    Color, EvalError, Host, ManualHost, MapRequest, Method, SourceTarget, Stop, Value, Variable,
    Vector,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn t(s: &str) -> Value {
    Value::Text(s.into())
}

fn n(v: f64) -> Value {
    Value::Number(v)
}

fn number(var: &mut Variable, host: &mut ManualHost) -> f64 {
    var.val(host)
        .expect("evaluation should succeed")
        .and_then(|v| v.as_number())
        .expect("variable should yield a number")
}

#[test]
fn static_map_is_context_independent() {
    init_logs();
    let values = [
        n(-3.25),
        Value::Bool(false),
        Value::Color(Color::rgba(1.0, 2.0, 3.0, 4.0)),
        Value::Vector(Vector::new(None, Some(2.0), None)),
    ];
    for v in values {
        let mut var = Variable::new();
        var.map(&[v.clone()]);
        let mut host = ManualHost::new(99);
        for _ in 0..50 {
            host.advance(37.0);
            assert_eq!(var.val(&mut host).unwrap(), Some(v.clone()));
        }
    }
}

#[test]
fn cycle_tracks_sine_within_unit_range() {
    init_logs();
    let m = 750.0;
    let mut var = Variable::new();
    var.apply(MapRequest::time_mapped(Method::Cycle, 0.0, 1.0, m));
    let mut host = ManualHost::new(0);
    for i in 0..200 {
        host.set_time(i as f64 * 41.3);
        let v = number(&mut var, &mut host);
        assert_abs_diff_eq!(v, (host.time_ms() / m).sin() / 2.0 + 0.5, epsilon = 1e-9);
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
fn span_is_a_sawtooth() {
    let m = 400.0;
    let mut var = Variable::new();
    var.map(&[t("span"), n(0.0), n(1.0), n(m)]);
    let mut host = ManualHost::new(0);
    for k in 0..6 {
        host.set_time(m * k as f64);
        assert_eq!(number(&mut var, &mut host), 0.0);
        host.set_time(m * k as f64 + 100.0);
        assert_abs_diff_eq!(number(&mut var, &mut host), 0.25, epsilon = 1e-12);
        host.set_time(m * k as f64 + 399.0);
        let v = number(&mut var, &mut host);
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn two_stop_numeric_midpoint() {
    let mut host = ManualHost::new(0);
    host.ranges_mut()
        .register("hundred", vec![Stop::new(0.0, 0.0), Stop::new(1.0, 100.0)]);
    let mut var = Variable::new();
    var.map(&[t("span"), t("hundred"), n(1000.0)]);
    host.set_time(500.0);
    assert_abs_diff_eq!(number(&mut var, &mut host), 50.0);
}

#[test]
fn random_hold_regenerates_after_modulator() {
    let mut host = ManualHost::new(2024);
    let mut var = Variable::new();
    var.map(&[t("random-hold"), n(0.0), n(1.0), n(300.0)]);

    host.set_time(1000.0);
    let first = number(&mut var, &mut host);
    host.set_time(1150.0);
    assert_eq!(number(&mut var, &mut host), first);
    host.set_time(1299.9);
    assert_eq!(number(&mut var, &mut host), first);
    assert_eq!(
        var.context().and_then(|c| c.random_hold()).map(|h| h.generated_at),
        Some(1000.0)
    );

    host.set_time(1300.0);
    let third = number(&mut var, &mut host);
    assert!((0.0..1.0).contains(&third));
    assert_eq!(
        var.context().and_then(|c| c.random_hold()).map(|h| h.generated_at),
        Some(1300.0)
    );
}

#[test]
fn vector_midpoint_keeps_absent_axes_absent() {
    let mut var = Variable::new();
    var.map(&[
        t("span"),
        Value::Vector(Vector::xy(0.0, 0.0)),
        Value::Vector(Vector::xy(10.0, 20.0)),
    ]);
    let mut host = ManualHost::new(0);
    host.set_time(222.0);
    let v = var.val(&mut host).unwrap().unwrap();
    assert_eq!(v, Value::Vector(Vector::xy(5.0, 10.0)));
    assert_eq!(v.as_vector().and_then(|v| v.z), None);
}

#[test]
fn exact_stop_hits_are_not_blended() {
    let mut host = ManualHost::new(0);
    let teal = Color::rgb(0.0, 111.0, 90.0);
    host.ranges_mut().register(
        "colors",
        vec![
            Stop::new(0.0, Color::rgb(0.0, 0.0, 0.0)),
            Stop::new(0.25, teal),
            Stop::new(1.0, Color::rgb(255.0, 255.0, 255.0)),
        ],
    );
    host.ranges_mut().register(
        "numbers",
        vec![Stop::new(0.0, 1.0), Stop::new(0.25, 42.0), Stop::new(1.0, 3.0)],
    );
    host.ranges_mut().register(
        "vectors",
        vec![
            Stop::new(0.0, Vector::xy(0.0, 0.0)),
            Stop::new(0.25, Vector::xyz(7.0, 8.0, 9.0)),
            Stop::new(1.0, Vector::xy(1.0, 1.0)),
        ],
    );
    // span 100 / 400 lands exactly on 0.25
    host.set_time(100.0);
    let expected = [
        ("colors", Value::Color(teal)),
        ("numbers", n(42.0)),
        ("vectors", Value::Vector(Vector::xyz(7.0, 8.0, 9.0))),
    ];
    for (range, want) in expected {
        let mut var = Variable::new();
        var.map(&[t("span"), t(range), n(400.0)]);
        assert_eq!(var.val(&mut host).unwrap(), Some(want), "{range}");
    }
}

#[test]
fn source_range_narrows_the_method_output() {
    let mut var = Variable::new();
    var.apply(MapRequest::source_mapped(
        Method::Span,
        0.5,
        1.0,
        SourceTarget::Bounds {
            from: n(0.0),
            to: n(10.0),
        },
        Some(n(1000.0)),
    ));
    let mut host = ManualHost::new(0);
    host.set_time(750.0);
    assert_abs_diff_eq!(number(&mut var, &mut host), 5.0, epsilon = 1e-9);
}

#[test]
fn noise_method_stays_in_range() {
    let mut var = Variable::new();
    var.map(&[t("noise"), n(-5.0), n(5.0)]);
    let mut host = ManualHost::new(7);
    let mut seen = Vec::new();
    for _ in 0..100 {
        host.advance(16.0);
        let v = number(&mut var, &mut host);
        assert!((-5.0..=5.0).contains(&v));
        seen.push(v);
    }
    assert!(seen.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn reserved_methods_report_not_implemented() {
    let mut host = ManualHost::new(0);
    for name in ["order", "count", "distance-x", "distance-y", "distance-z"] {
        let mut var = Variable::new();
        var.map(&[t(name), n(0.0), n(1.0)]);
        let method: Method = name.parse().unwrap();
        assert_eq!(var.val(&mut host), Err(EvalError::NotImplemented(method)));
    }
}
