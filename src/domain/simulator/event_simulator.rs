use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::application::app_edge::EdgeRole;
use crate::domain::application::selectivity::SelectivityAccumulator;
use crate::domain::placement::placement::Placement;
use crate::domain::simulator::clock::SimClock;
use crate::domain::simulator::engine::{SimulationEngine, Submission};
use crate::domain::simulator::report::{LoopLatency, SimulationReport};
use crate::domain::utils::id::EntityId;
use crate::error::{Error, Result};

/// A tuple in flight. It remembers where it came from so loop latencies can
/// be measured once it reaches an actuator.
#[derive(Debug, Clone)]
struct Tuple {
    tuple_type: String,
    origin_sensor: usize,
    emitted_at: f64,

    /// Graph nodes visited so far, starting with the sensor tag.
    path: Vec<String>,

    /// Work the receiving module spends on this tuple.
    processing_length: f64,
}

#[derive(Debug)]
enum EventPayload {
    SensorEmit { sensor: usize },
    ModuleArrival { module: String, device: EntityId, tuple: Tuple },
    ActuatorArrival { actuator: usize, tuple: Tuple },
}

#[derive(Debug)]
struct ScheduledEvent {
    time: f64,
    seq: u64,
    payload: EventPayload,
}

// BinaryHeap is a max-heap; earliest time (then lowest seq) must pop first.
impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        other.time.total_cmp(&self.time).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

#[derive(Debug)]
struct PreparedRun {
    submission: Submission,
    placement: Placement,
}

/// Minimal discrete-event engine for the scenario.
///
/// Sensors emit until the horizon; tuples already in flight at that point
/// are still delivered. Delays are tree link latencies plus
/// `processing_length / mips` on the hosting device. Queueing, energy and
/// bandwidth contention are not modelled.
#[derive(Debug)]
pub struct EventSimulator {
    clock: SimClock,
    rng: StdRng,
    queue: BinaryHeap<ScheduledEvent>,
    next_seq: u64,
    prepared: Option<PreparedRun>,
    accumulators: HashMap<(EntityId, String, String, String), SelectivityAccumulator>,
}

impl EventSimulator {
    pub fn new(seed: u64) -> Self {
        Self {
            clock: SimClock::new(),
            rng: StdRng::seed_from_u64(seed),
            queue: BinaryHeap::new(),
            next_seq: 0,
            prepared: None,
            accumulators: HashMap::new(),
        }
    }

    fn schedule(&mut self, time: f64, payload: EventPayload) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(ScheduledEvent { time, seq, payload });
    }

    fn handle_sensor_emit(&mut self, run: &PreparedRun, report: &mut SimulationReport, sensor_index: usize, end_time: f64) {
        let submission = &run.submission;
        let sensor = &submission.sensors[sensor_index];
        let now = self.clock.now();

        *report.emitted.entry(sensor.name.to_string()).or_default() += 1;

        for edge in submission.application.outgoing_edges(&sensor.tuple_type).filter(|edge| edge.role == EdgeRole::Sensor) {
            *report.tuples_by_type.entry(edge.tuple_type.clone()).or_default() += 1;

            let Some(host) = run.placement.host_for(&edge.destination, sensor.gateway_device_id, &submission.topology) else {
                log::debug!("Dropping '{}' tuple of '{}': module '{}' is not placed.", edge.tuple_type, sensor.name, edge.destination);
                report.dropped += 1;
                continue;
            };

            let network = submission.topology.latency_between(sensor.gateway_device_id, host).unwrap_or(0.0);
            let tuple = Tuple {
                tuple_type: edge.tuple_type.clone(),
                origin_sensor: sensor_index,
                emitted_at: now,
                path: vec![sensor.tuple_type.clone()],
                processing_length: edge.processing_length,
            };
            self.schedule(now + sensor.latency + network, EventPayload::ModuleArrival { module: edge.destination.clone(), device: host, tuple });
        }

        let next = now + sensor.distribution.next_value(&mut self.rng);
        if next <= end_time {
            self.schedule(next, EventPayload::SensorEmit { sensor: sensor_index });
        }
    }

    fn handle_module_arrival(&mut self, run: &PreparedRun, report: &mut SimulationReport, module: String, device: EntityId, tuple: Tuple) {
        let submission = &run.submission;
        let application = &submission.application;
        let topology = &submission.topology;

        let Some(host) = topology.get(device) else {
            report.dropped += 1;
            return;
        };
        let done = self.clock.now() + tuple.processing_length / host.mips as f64;

        let mut path = tuple.path.clone();
        path.push(module.clone());

        let rules: Vec<_> = application.rules_for(&module, &tuple.tuple_type).collect();
        if rules.is_empty() {
            log::debug!("Dropping '{}' tuple at '{}': no selectivity rule consumes it.", tuple.tuple_type, module);
            report.dropped += 1;
            return;
        }

        for rule in rules {
            let key = (device, module.clone(), rule.input_tuple_type.clone(), rule.output_tuple_type.clone());
            let released = self.accumulators.entry(key).or_default().feed(rule.selectivity);

            for _ in 0..released {
                for edge in application.outgoing_edges(&module).filter(|edge| edge.tuple_type == rule.output_tuple_type) {
                    *report.tuples_by_type.entry(edge.tuple_type.clone()).or_default() += 1;

                    let outgoing = Tuple {
                        tuple_type: edge.tuple_type.clone(),
                        origin_sensor: tuple.origin_sensor,
                        emitted_at: tuple.emitted_at,
                        path: path.clone(),
                        processing_length: edge.processing_length,
                    };

                    match edge.role {
                        EdgeRole::Module => match run.placement.host_for(&edge.destination, device, topology) {
                            Some(next_host) => {
                                let network = topology.latency_between(device, next_host).unwrap_or(0.0);
                                self.schedule(
                                    done + network,
                                    EventPayload::ModuleArrival { module: edge.destination.clone(), device: next_host, tuple: outgoing },
                                );
                            }
                            None => report.dropped += 1,
                        },
                        EdgeRole::Actuator => {
                            let origin = submission.sensors[tuple.origin_sensor].id;
                            let targets: Vec<usize> = submission
                                .actuators
                                .iter()
                                .enumerate()
                                .filter(|(_, actuator)| actuator.actuator_type == edge.destination && actuator.paired_sensor_id == origin)
                                .map(|(index, _)| index)
                                .collect();

                            if targets.is_empty() {
                                report.dropped += 1;
                            }

                            for index in targets {
                                let actuator = &submission.actuators[index];
                                let network = topology.latency_between(device, actuator.gateway_device_id).unwrap_or(0.0);
                                let actuation = match (edge.actuation_cost, topology.get(actuator.gateway_device_id)) {
                                    (Some(cost), Some(gateway)) => cost / gateway.mips as f64,
                                    _ => 0.0,
                                };
                                self.schedule(
                                    done + network + actuator.latency + actuation,
                                    EventPayload::ActuatorArrival { actuator: index, tuple: outgoing.clone() },
                                );
                            }
                        }
                        EdgeRole::Sensor => report.dropped += 1,
                    }
                }
            }
        }
    }

    fn handle_actuator_arrival(&mut self, run: &PreparedRun, report: &mut SimulationReport, actuator_index: usize, tuple: Tuple) {
        let submission = &run.submission;
        let actuator = &submission.actuators[actuator_index];
        let now = self.clock.now();

        *report.delivered.entry(actuator.name.to_string()).or_default() += 1;

        let mut path = tuple.path;
        path.push(actuator.actuator_type.clone());

        for (app_loop, latency) in submission.application.loops.iter().zip(report.loops.iter_mut()) {
            if app_loop.nodes == path {
                latency.record(now - tuple.emitted_at);
            }
        }
    }
}

impl SimulationEngine for EventSimulator {
    fn submit(&mut self, submission: Submission) -> Result<()> {
        submission.topology.validate()?;
        submission.application.validate()?;
        for sensor in &submission.sensors {
            sensor.distribution.validate()?;
        }

        let placement = Placement::resolve(&submission.strategy, &submission.topology, &submission.application, &submission.sensors)?;

        self.prepared = Some(PreparedRun { submission, placement });
        Ok(())
    }

    fn run(&mut self, end_time: f64) -> Result<SimulationReport> {
        if !end_time.is_finite() || end_time <= 0.0 {
            return Err(Error::ConfigurationError(format!("simulation end time must be positive, got {}", end_time)));
        }
        let run = self.prepared.take().ok_or_else(|| Error::SubmissionError("no application was submitted".to_string()))?;
        let submission = &run.submission;

        let mut report = SimulationReport {
            strategy: submission.strategy.to_string(),
            end_time,
            emitted: submission.sensors.iter().map(|sensor| (sensor.name.to_string(), 0)).collect(),
            emission_mean: submission.sensors.iter().map(|sensor| (sensor.name.to_string(), sensor.distribution.mean())).collect(),
            delivered: submission.actuators.iter().map(|actuator| (actuator.name.to_string(), 0)).collect(),
            loops: submission.application.loops.iter().map(|app_loop| LoopLatency::new(app_loop.label())).collect(),
            ..Default::default()
        };

        self.queue.clear();
        self.accumulators.clear();
        self.clock.init();
        self.clock.start()?;

        for (index, sensor) in submission.sensors.iter().enumerate() {
            let first = sensor.distribution.next_value(&mut self.rng);
            if first <= end_time {
                self.schedule(first, EventPayload::SensorEmit { sensor: index });
            }
        }

        let mut processed: u64 = 0;
        while let Some(event) = self.queue.pop() {
            self.clock.advance_to(event.time);
            processed += 1;

            match event.payload {
                EventPayload::SensorEmit { sensor } => self.handle_sensor_emit(&run, &mut report, sensor, end_time),
                EventPayload::ModuleArrival { module, device, tuple } => self.handle_module_arrival(&run, &mut report, module, device, tuple),
                EventPayload::ActuatorArrival { actuator, tuple } => self.handle_actuator_arrival(&run, &mut report, actuator, tuple),
            }
        }

        self.clock.stop();
        report.finish_time = self.clock.now();
        report.placement = run.placement.describe(&submission.topology);

        log::info!(
            "Processed {} events: {} tuples emitted, {} delivered, {} dropped.",
            processed,
            report.total_emitted(),
            report.total_delivered(),
            report.dropped
        );
        Ok(report)
    }
}
