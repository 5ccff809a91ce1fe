#![forbid(unsafe_code)]

//! Scripted walkthrough of the reconciliation policy.
//!
//! Runs three counter hosts against one shared reconciler — uncontrolled,
//! default-seeded, and controlled — then the single-field form, printing
//! each transition.

use autoprop::{AutoControlled, Bundle, Field, Patch, Reconciler, ReconcilerBuilder, State};

/// Host fields carry mixed types, so the host declares a value enum.
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Num(i64),
    Text(&'static str),
    Flag(bool),
}

fn counter_reconciler() -> Reconciler<Value> {
    ReconcilerBuilder::new()
        .field(Field::new("value").default_name("defaultValue"))
        .field(Field::new("name").default_name("defaultName"))
        .initial_state_with(|_| {
            let mut state = State::new();
            state.insert("value", Value::Num(0));
            state.insert("name", Value::Text("Andrew"));
            state.insert("active", Value::Flag(false));
            state
        })
        .build()
}

struct Counter {
    label: &'static str,
    state: State<Value>,
}

impl Counter {
    fn mount(label: &'static str, reconciler: &Reconciler<Value>, overrides: &Bundle<Value>) -> Self {
        let state = reconciler.initial_state(overrides);
        let counter = Self { label, state };
        counter.show("mounted");
        counter
    }

    fn click(&mut self, reconciler: &Reconciler<Value>, overrides: &Bundle<Value>) {
        let next = match self.state.get("value") {
            Some(Value::Num(n)) => Value::Num(n + 1),
            _ => Value::Num(0),
        };
        let applied = reconciler.try_set_state_then(
            overrides,
            Patch::new().with("value", next).with("name", Value::Text("Bob")),
            &mut self.state,
            || println!("  [{:>12}] redisplay requested", "callback"),
        );
        self.show(if applied { "clicked" } else { "click ignored" });
    }

    fn update(&mut self, reconciler: &Reconciler<Value>, overrides: &Bundle<Value>) {
        let patch = reconciler.derive_on_update(overrides, &self.state);
        patch.apply_to(&mut self.state);
        self.show("updated");
    }

    fn show(&self, occasion: &str) {
        println!(
            "  [{:>12}] {}: value={:?} name={:?} active={:?}",
            occasion,
            self.label,
            self.state.get("value"),
            self.state.get("name"),
            self.state.get("active"),
        );
    }
}

fn main() {
    let reconciler = counter_reconciler();

    println!("uncontrolled counter (host owns everything):");
    let free = Bundle::new();
    let mut counter = Counter::mount("free", &reconciler, &free);
    counter.click(&reconciler, &free);
    counter.click(&reconciler, &free);

    println!("default-seeded counter (seed once, then host-owned):");
    let seeded = Bundle::new()
        .with("defaultValue", Value::Num(20))
        .with("defaultName", Value::Text("Cody"));
    let mut counter = Counter::mount("seeded", &reconciler, &seeded);
    counter.click(&reconciler, &seeded);

    println!("controlled counter (owner dictates value and name):");
    let owned = Bundle::new()
        .with("value", Value::Num(10))
        .with("name", Value::Text("Charlie"));
    let mut counter = Counter::mount("owned", &reconciler, &owned);
    counter.click(&reconciler, &owned);
    let owned = Bundle::new()
        .with("value", Value::Num(11))
        .with("name", Value::Text("Charlie"));
    counter.update(&reconciler, &owned);

    println!("single-field mirror:");
    let mut level = AutoControlled::new(0_i64, Some(5));
    println!("  mounted with default: {}", level.get());
    level.try_set(None, 6);
    println!("  after internal bump:  {}", level.get());
    let owner = 40;
    level.sync(Some(&owner));
    println!("  owner takes control:  {}", level.get());
    let ignored = level.try_set(Some(&owner), 99);
    println!("  internal bump applied while controlled: {ignored}");
}
