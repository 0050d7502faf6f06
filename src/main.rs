use tracing_subscriber::EnvFilter;

use tinyrisc::{assemble, Machine, MachineConfig, Status};

/// Multiplies 10 by 5 with repeated addition and stores the product at address 0.
const LOOP_DEMO: &str = "
  set x1 10
  set x2 5
  set x8 0
  slti x3 x1 1      # done counting?
  bne x3 x0 12      # then skip to the store
  addi x1 x1 -1
  add x8 x8 x2
  jal x0 -20        # back to the test
  sw x7 0 x8
  hlt
";

/// The same product with the multiply instruction.
const MULTIPLY_DEMO: &str = "
  set x1 10
  set x2 5
  mlt x8 x1 x2
  hlt
";

const STEP_BUDGET: usize = 100;

fn run_demo(name: &str, source: &str) {
  println!("Program: {}", name);

  let program =
    match assemble(source) {
      Ok(program) => program,
      Err(e) => {
        eprintln!("Assembly failed: {}", e);
        return;
      }
    };

  let mut machine = Machine::with_config(MachineConfig::default());
  if let Err(fault) = machine.load(0, &program) {
    eprintln!("Could not load program: {}", fault);
    return;
  }

  println!("Initial machine state:\n{}", machine);

  match machine.run(STEP_BUDGET) {
    Ok(Status::Halted)  => println!("Halted."),
    Ok(Status::Running) => println!("Stopped after {} steps without halting.", STEP_BUDGET),
    Err(fault)          => eprintln!("Fault: {}", fault),
  }

  println!("Final machine state:\n{}", machine);
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  #[cfg(feature = "trace_computation")]
  println!("Computation Tracing ENABLED");

  run_demo("repeated addition", LOOP_DEMO);
  run_demo("multiply", MULTIPLY_DEMO);
}
