// Drop 200 needles on a 10-by-10 table and print them as CSV, along with the
// grid lines, for plotting elsewhere. Crossing needles are marked red.
use buffon::Cartoon;

fn main() {
    env_logger::builder().init();

    let mut rng = rand::thread_rng();
    let frame = Cartoon::default().draw(&mut rng);

    println!("kind,x1,y1,x2,y2,color");
    let top = frame.span() + 1.0;
    for x in frame.grid_lines() {
        println!("line,{x},-1,{x},{top},black");
    }
    for needle in frame.needles() {
        let ((x1, x2), (y1, y2)) = needle.endpoints;
        let color = if needle.crosses { "red" } else { "blue" };
        println!("needle,{x1},{y1},{x2},{y2},{color}");
    }

    eprintln!(
        "{} of {} needles cross a line",
        frame.n_crossing(),
        frame.needles().len()
    );
}
