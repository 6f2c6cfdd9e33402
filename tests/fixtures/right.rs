fn main() {
    let name = "car";
    println!("hello, {}", name);
}
// trailing note
