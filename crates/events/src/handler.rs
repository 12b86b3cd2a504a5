/// Execute an aggregate command in place: decide, then evolve.
///
/// 1. **Decide**: `aggregate.handle(command)` checks every rule without
///    touching state. A rejection returns here and the aggregate is exactly
///    as it was.
/// 2. **Evolve**: each returned event is applied in order.
///
/// The applied events are returned so callers can report or log them.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: haversack_core::Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}
